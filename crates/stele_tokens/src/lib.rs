#![doc = include_str!("../README.md")]

use crate::position::Position;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub mod position;
pub mod token;

/// An error with a location
#[derive(Debug, Clone)]
pub struct LocatedError<E> {
    error: E,
    position: Option<Position>,
}

impl<E> LocatedError<E> {
    /// Creates a new located error
    pub fn new(error: impl Into<E>, position: impl Into<Option<Position>>) -> Self {
        Self {
            error: error.into(),
            position: position.into(),
        }
    }

    /// Gets the kind of error that occurred
    pub fn kind(&self) -> &E {
        &self.error
    }

    /// Consumes this error, returning the kind
    pub fn into_kind(self) -> E {
        self.error
    }

    /// Where in the source this error occurred, if known
    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

impl<E: Display> Display for LocatedError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{position}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl<E: Error + 'static> Error for LocatedError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.source()
    }
}
