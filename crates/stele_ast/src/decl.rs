//! Declarations introduce names into a scope

use crate::expr::Expr;
use derive_more::From;
use stele_tokens::position::{Position, Positioned};
use stele_types::Type;

/// Something declared in a scope: an import or a let binding.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Declaration {
    Import(Import),
    Let(Let),
}

impl Declaration {
    /// The identifier being declared
    pub fn id(&self) -> &str {
        match self {
            Declaration::Import(import) => import.name(),
            Declaration::Let(binding) => binding.name(),
        }
    }

    /// Whether [ty](Self::ty) can be called on this declaration
    pub fn has_type(&self) -> bool {
        match self {
            Declaration::Import(_) => false,
            Declaration::Let(_) => true,
        }
    }

    /// The type of the value bound to the identifier.
    ///
    /// # Panics
    /// Types of imports can not be derived yet, so this panics for
    /// [Declaration::Import]. Check [has_type](Self::has_type) first when the
    /// variant isn't known.
    pub fn ty(&self) -> &Type {
        match self {
            Declaration::Import(import) => {
                unimplemented!("type of import {:?} can not be derived", import.path())
            }
            Declaration::Let(binding) => binding.ty(),
        }
    }

    /// Whether the value bound to the identifier can be changed at run-time
    pub fn is_mutable(&self) -> bool {
        match self {
            Declaration::Import(_) => false,
            Declaration::Let(binding) => binding.is_mutable(),
        }
    }

    /// Whether scripts importing this one can see the identifier
    pub fn is_exported(&self) -> bool {
        match self {
            Declaration::Import(_) => false,
            Declaration::Let(binding) => binding.is_exported(),
        }
    }
}

impl Positioned for Declaration {
    fn position(&self) -> Position {
        match self {
            Declaration::Import(import) => import.position(),
            Declaration::Let(binding) => binding.position(),
        }
    }
}

/// An imported script, bound to a local name
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    position: Position,
    name: String,
    path: String,
}

impl Import {
    /// Creates a new import
    pub fn new(position: Position, name: impl AsRef<str>, path: impl AsRef<str>) -> Self {
        Self {
            position,
            name: name.as_ref().to_string(),
            path: path.as_ref().to_string(),
        }
    }

    /// The local name of the import
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path of the imported script, as written
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Positioned for Import {
    fn position(&self) -> Position {
        self.position
    }
}

/// A let binding.
///
/// Names ending with `!` are immutable and names starting with `_` are not exported.
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    position: Position,
    name: String,
    ty: Type,
    value: Expr,
}

impl Let {
    /// Creates a new let binding
    pub fn new(position: Position, name: impl AsRef<str>, ty: Type, value: Expr) -> Self {
        Self {
            position,
            name: name.as_ref().to_string(),
            ty,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the binding
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The value the binding is initialized with
    pub fn value(&self) -> &Expr {
        &self.value
    }

    pub fn is_mutable(&self) -> bool {
        !self.name.ends_with('!')
    }

    pub fn is_exported(&self) -> bool {
        !self.name.starts_with('_')
    }
}

impl Positioned for Let {
    fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Literal;
    use test_log::test;

    fn let_named(name: &str) -> Declaration {
        Let::new(
            Position::new(1, 1),
            name,
            Type::named("int"),
            Literal::Int(0).into(),
        )
        .into()
    }

    #[test]
    fn test_naming_conventions() {
        let plain = let_named("x");
        assert!(plain.is_mutable());
        assert!(plain.is_exported());

        let immutable = let_named("x!");
        assert!(!immutable.is_mutable());
        assert!(immutable.is_exported());

        let private = let_named("_y");
        assert!(private.is_mutable());
        assert!(!private.is_exported());

        let both = let_named("_z!");
        assert!(!both.is_mutable());
        assert!(!both.is_exported());
    }

    #[test]
    fn test_import_flags() {
        let import: Declaration = Import::new(Position::new(1, 1), "else", "something/else").into();
        assert_eq!(import.id(), "else");
        assert!(!import.is_mutable());
        assert!(!import.is_exported());
        assert!(!import.has_type());
    }

    #[test]
    fn test_let_type() {
        let binding = let_named("v");
        assert!(binding.has_type());
        assert_eq!(binding.ty(), &Type::named("int"));
    }

    #[test]
    #[should_panic]
    fn test_import_type_is_fatal() {
        let import: Declaration = Import::new(Position::new(1, 1), "x", "x").into();
        let _ = import.ty();
    }
}
