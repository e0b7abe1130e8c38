//! Atoms and handles.
//!
//! An `Atom` is either a node (a type and a name) or a link (a type and an
//! ordered outgoing set of handles). Atoms are immutable apart from their
//! truth value, so they are shared freely through `Handle`, a thin `Arc`.
//!
//! Equality and hashing are structural: two handles built independently
//! from the same type and name/outgoing set compare equal, which is what
//! lets the `AtomSpace` intern them. Pointer identity is available
//! separately through [`Handle::same_ref`].

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;

use super::TruthValue;
use crate::backend::types::Type;

/// Payload of an atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomKind {
    Node(String),
    Link(Vec<Handle>),
}

/// A node or link in the hypergraph.
pub struct Atom {
    ty: Type,
    kind: AtomKind,
    /// Structural hash, computed once at construction.
    hash: u64,
    tv: RwLock<TruthValue>,
}

impl Atom {
    fn new(ty: Type, kind: AtomKind, tv: TruthValue) -> Self {
        let mut hasher = DefaultHasher::new();
        ty.hash(&mut hasher);
        match &kind {
            AtomKind::Node(name) => name.hash(&mut hasher),
            AtomKind::Link(outgoing) => {
                outgoing.len().hash(&mut hasher);
                for h in outgoing {
                    h.0.hash.hash(&mut hasher);
                }
            }
        }
        Atom {
            ty,
            kind,
            hash: hasher.finish(),
            tv: RwLock::new(tv),
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.ty == other.ty && self.kind == other.kind
    }
}

impl Eq for Atom {}

/// Shared reference to an atom. Cloning is O(1).
#[derive(Clone)]
pub struct Handle(Arc<Atom>);

impl Handle {
    /// Create a node with the default truth value.
    pub fn node(ty: Type, name: impl Into<String>) -> Self {
        debug_assert!(ty.is_node(), "{} is not a node type", ty);
        Handle(Arc::new(Atom::new(
            ty,
            AtomKind::Node(name.into()),
            TruthValue::DEFAULT,
        )))
    }

    /// Create a link with the default truth value.
    pub fn link(ty: Type, outgoing: Vec<Handle>) -> Self {
        Self::link_with_tv(ty, outgoing, TruthValue::DEFAULT)
    }

    /// Create a link carrying the given truth value.
    pub fn link_with_tv(ty: Type, outgoing: Vec<Handle>, tv: TruthValue) -> Self {
        debug_assert!(ty.is_link(), "{} is not a link type", ty);
        Handle(Arc::new(Atom::new(ty, AtomKind::Link(outgoing), tv)))
    }

    pub fn concept(name: impl Into<String>) -> Self {
        Self::node(Type::ConceptNode, name)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::node(Type::VariableNode, name)
    }

    pub fn glob(name: impl Into<String>) -> Self {
        Self::node(Type::GlobNode, name)
    }

    /// A `NumberNode` whose name is the `Display` form of `value`.
    pub fn number(value: f64) -> Self {
        Self::node(Type::NumberNode, format_number(value))
    }

    #[inline]
    pub fn ty(&self) -> Type {
        self.0.ty
    }

    #[inline]
    pub fn kind(&self) -> &AtomKind {
        &self.0.kind
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        matches!(self.0.kind, AtomKind::Node(_))
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        matches!(self.0.kind, AtomKind::Link(_))
    }

    /// Node name, `None` for links.
    pub fn name(&self) -> Option<&str> {
        match &self.0.kind {
            AtomKind::Node(name) => Some(name),
            AtomKind::Link(_) => None,
        }
    }

    /// Outgoing set; empty for nodes.
    pub fn outgoing(&self) -> &[Handle] {
        match &self.0.kind {
            AtomKind::Node(_) => &[],
            AtomKind::Link(outgoing) => outgoing,
        }
    }

    #[inline]
    pub fn outgoing_atom(&self, index: usize) -> Option<&Handle> {
        self.outgoing().get(index)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.outgoing().len()
    }

    /// Numeric value of a `NumberNode`.
    pub fn as_number(&self) -> Option<f64> {
        match (&self.0.kind, self.0.ty) {
            (AtomKind::Node(name), Type::NumberNode) => name.parse().ok(),
            _ => None,
        }
    }

    pub fn truth_value(&self) -> TruthValue {
        *self.0.tv.read()
    }

    pub fn set_truth_value(&self, tv: TruthValue) {
        *self.0.tv.write() = tv;
    }

    /// Pointer identity, as opposed to the structural `==`.
    #[inline]
    pub fn same_ref(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// True if any `VariableNode` or `GlobNode` occurs anywhere below.
    pub fn contains_variables(&self) -> bool {
        if self.ty().is_variable() {
            return true;
        }
        self.outgoing().iter().any(Handle::contains_variables)
    }
}

/// `3` rather than `3.0`; everything else as `f64` prints it.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            AtomKind::Node(name) => write!(f, "({} \"{}\")", self.0.ty, name),
            AtomKind::Link(outgoing) => {
                write!(f, "({}", self.0.ty)?;
                for h in outgoing {
                    write!(f, " {}", h)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
