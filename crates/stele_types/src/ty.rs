//! Types

use crate::feature::Feature;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A named type together with the features values of it have.
///
/// The default type has no name and stands for a type that could not be
/// derived. It is not [valid](Type::is_valid).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Type {
    name: String,
    features: Vec<Feature>,
}

impl Type {
    /// Creates a featureless type with the given name
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            features: vec![],
        }
    }

    /// Adds a feature to this type
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The features of this type, in declaration order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// A type is valid if it has a name
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.is_valid() {
            return write!(f, "<unknown>");
        }
        write!(f, "{}", self.name)?;
        if !self.features.is_empty() {
            write!(f, " {{ {} }}", self.features.iter().join("; "))?;
        }
        Ok(())
    }
}
