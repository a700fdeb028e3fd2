//! Expressions

use stele_types::Type;

/// An expression.
///
/// Only single primaries exist so far, operators and calls are not yet part of the grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// A reference to a declared identifier
    Name(String),
}

impl Expr {
    /// The type of the value this expression produces.
    ///
    /// Names are not resolved yet, so their type is the invalid default.
    pub fn ty(&self) -> Type {
        match self {
            Expr::Literal(literal) => literal.ty(),
            Expr::Name(_) => Type::default(),
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Int(_) => Type::named("int"),
            Literal::Float(_) => Type::named("float"),
            Literal::String(_) => Type::named("string"),
        }
    }
}
