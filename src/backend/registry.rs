//! Node registry: type-class queries and definition lookup.

use super::atomspace::AtomSpace;
use super::grounded::ExecResult;
use super::models::Handle;
use super::types::Type;

/// What the instantiator needs to know about atom types and definitions.
pub trait NodeRegistry: Send + Sync {
    /// Body bound to a `DefinedSchemaNode` / `DefinedPredicateNode`.
    fn definition_of(&self, space: &AtomSpace, defined: &Handle) -> ExecResult<Handle>;

    /// Closed-world subtype test.
    fn is_a(&self, ty: Type, family: Type) -> bool;
}

/// Registry backed by the static type hierarchy and the store's `DefineLink`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomSpaceRegistry;

impl NodeRegistry for AtomSpaceRegistry {
    fn definition_of(&self, space: &AtomSpace, defined: &Handle) -> ExecResult<Handle> {
        space.definition_of(defined)
    }

    #[inline]
    fn is_a(&self, ty: Type, family: Type) -> bool {
        ty.is_a(family)
    }
}
