//! Traits for grounded (native) code.
//!
//! - `GroundedSchema` - arguments to a result atom
//! - `GroundedPredicate` - arguments to a truth value
//!
//! Both receive already-instantiated arguments; the instantiator walks the
//! argument list of an `ExecutionOutputLink` before handing it over, and
//! keeps any quotes in it intact.

use super::{AtomSpace, ExecResult, Handle, TruthValue};

/// Native function bound to a `GroundedSchemaNode`.
///
/// # Implementing a Grounded Schema
///
/// ```ignore
/// struct Reverse;
///
/// impl GroundedSchema for Reverse {
///     fn execute(&self, _space: &AtomSpace, args: &[Handle]) -> ExecResult<Handle> {
///         let mut out = args.to_vec();
///         out.reverse();
///         Ok(Handle::link(Type::ListLink, out))
///     }
/// }
/// ```
pub trait GroundedSchema: Send + Sync {
    fn execute(&self, space: &AtomSpace, args: &[Handle]) -> ExecResult<Handle>;
}

/// Native predicate bound to a `GroundedPredicateNode`.
pub trait GroundedPredicate: Send + Sync {
    fn evaluate(&self, space: &AtomSpace, args: &[Handle]) -> ExecResult<TruthValue>;
}

impl<F> GroundedSchema for F
where
    F: Fn(&AtomSpace, &[Handle]) -> ExecResult<Handle> + Send + Sync,
{
    fn execute(&self, space: &AtomSpace, args: &[Handle]) -> ExecResult<Handle> {
        self(space, args)
    }
}

impl<F> GroundedPredicate for F
where
    F: Fn(&AtomSpace, &[Handle]) -> ExecResult<TruthValue> + Send + Sync,
{
    fn evaluate(&self, space: &AtomSpace, args: &[Handle]) -> ExecResult<TruthValue> {
        self(space, args)
    }
}
