#![doc = include_str!("../README.md")]

use crate::parser::{ParseError, Parser};
use std::io::Read;
use stele_ast::script::Script;

pub mod parser;
pub mod scanner;

/// Parses a script from a [Read] obj, adding its declarations to a [default](stele_ast::scope::Scope::default) scope
pub fn parse<R: Read>(reader: R) -> Result<Script, ParseError> {
    Parser::builder().build(reader).parse()
}
