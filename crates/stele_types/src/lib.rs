#![doc = include_str!("../README.md")]

pub mod feature;
pub mod ty;

pub use feature::{Feature, FeatureKind};
pub use ty::Type;
