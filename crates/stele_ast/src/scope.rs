//! Scopes track the declarations visible at a point in a script.

use crate::decl::Declaration;
use indexmap::IndexMap;
use log::trace;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// The declarations available to a piece of code.
///
/// A scope is an immutable link in a chain of scopes. Adding declarations never
/// changes a scope, it creates a child scope whose parent is the original one,
/// so parents are shared between any number of children and readers.
///
/// The [root](Scope::root) scope has no parent and no declarations. The
/// [default](Scope::default) scope is an empty, direct child of a root.
#[derive(Clone)]
pub struct Scope(Arc<Node>);

struct Node {
    parent: Option<Scope>,
    locals: Locals,
}

enum Locals {
    Empty,
    One(Declaration),
    Many(IndexMap<String, Declaration>),
}

impl Locals {
    fn get(&self, id: &str) -> Option<&Declaration> {
        match self {
            Locals::Empty => None,
            Locals::One(decl) => (decl.id() == id).then_some(decl),
            Locals::Many(map) => map.get(id),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Declaration> + '_> {
        match self {
            Locals::Empty => Box::new(std::iter::empty()),
            Locals::One(decl) => Box::new(std::iter::once(decl)),
            Locals::Many(map) => Box::new(map.values()),
        }
    }
}

impl Scope {
    /// Creates a root scope, which has no parent and declares nothing
    pub fn root() -> Self {
        Self::from_node(None, Locals::Empty)
    }

    fn from_node(parent: Option<Scope>, locals: Locals) -> Self {
        Self(Arc::new(Node { parent, locals }))
    }

    /// Creates an empty child of this scope
    pub fn child(&self) -> Self {
        Self::from_node(Some(self.clone()), Locals::Empty)
    }

    /// Creates a child scope containing only `decl`
    pub fn add(&self, decl: impl Into<Declaration>) -> Self {
        let decl = decl.into();
        trace!("adding {:?} to scope", decl.id());
        Self::from_node(Some(self.clone()), Locals::One(decl))
    }

    /// Creates a child scope containing every declaration in `decls`.
    ///
    /// If two declarations share an identifier, the later one replaces the earlier.
    pub fn add_all<I>(&self, decls: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Declaration>,
    {
        let mut map = IndexMap::new();
        for decl in decls {
            let decl = decl.into();
            map.insert(decl.id().to_string(), decl);
        }
        trace!("adding {} declarations to scope", map.len());
        Self::from_node(Some(self.clone()), Locals::Many(map))
    }

    /// Searches up the scope chain for the first declaration of `id`.
    pub fn get(&self, id: &str) -> Option<&Declaration> {
        let mut scope = self;
        loop {
            if let Some(decl) = scope.0.locals.get(id) {
                return Some(decl);
            }
            scope = scope.0.parent.as_ref()?;
        }
    }

    /// Gets a declaration made directly in this scope, ignoring parents
    pub fn get_local(&self, id: &str) -> Option<&Declaration> {
        self.0.locals.get(id)
    }

    /// The parent of this scope, or `None` if this is a root scope
    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Declarations made directly in this scope, in the order they were added
    pub fn locals(&self) -> impl Iterator<Item = &Declaration> {
        self.0.locals.iter()
    }

    /// Identifiers declared directly in this scope, in the order they were added
    pub fn local_ids(&self) -> impl Iterator<Item = &str> {
        self.locals().map(Declaration::id)
    }

    /// Whether two scopes are the same link of the same chain
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::root().child()
    }
}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // the identifiers of each link, innermost first
        write!(f, "Scope ")?;
        f.debug_list()
            .entries(
                std::iter::successors(Some(self), |scope| scope.parent())
                    .map(|scope| scope.local_ids().collect::<Vec<_>>()),
            )
            .finish()
    }
}

impl Drop for Node {
    // unlinks the chain iteratively so long chains can't overflow the stack
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(Scope(node)) = parent {
            match Arc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}
