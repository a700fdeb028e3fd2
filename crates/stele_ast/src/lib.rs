#![doc = include_str!("../README.md")]

pub mod decl;
pub mod expr;
pub mod scope;
pub mod script;
