//! Features are the structural capabilities of a type

use crate::ty::Type;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// What a [Feature] describes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureKind {
    /// the type can be bound and read like a variable
    Let,
    /// the type can be called like a function
    Func,
    /// the type has a particular memory layout
    MemLayout,
}

/// A structural capability of a [Type].
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    kind: FeatureKind,
    name: String,
    args: Vec<Type>,
    ret: Box<Type>,
}

impl Feature {
    /// Creates a new feature
    pub fn new(
        kind: FeatureKind,
        name: impl AsRef<str>,
        args: impl IntoIterator<Item = Type>,
        ret: Type,
    ) -> Self {
        Self {
            kind,
            name: name.as_ref().to_string(),
            args: args.into_iter().collect(),
            ret: Box::new(ret),
        }
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }

    pub fn ret(&self) -> &Type {
        &self.ret
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FeatureKind::Func => write!(
                f,
                "func {}({}) {}",
                self.name,
                self.args.iter().join(", "),
                self.ret
            ),
            kind => write!(f, "{kind} {} {}", self.name, self.ret),
        }
    }
}
