//! Scripts are the highest level

use crate::decl::Declaration;
use crate::scope::Scope;

/// A parsed script. Its top level declarations live in its scope.
#[derive(Debug, Clone)]
pub struct Script {
    scope: Scope,
}

impl Script {
    /// Creates a new script
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }

    /// The scope holding the top level declarations
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn into_scope(self) -> Scope {
        self.scope
    }

    /// Resolves `id` against the script's scope and every scope enclosing it
    pub fn get(&self, id: &str) -> Option<&Declaration> {
        self.scope.get(id)
    }

    /// The top level declarations of the script
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.scope.locals()
    }
}
