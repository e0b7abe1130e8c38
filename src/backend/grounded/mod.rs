//! Grounded schemas and predicates.
//!
//! A `GroundedSchemaNode` names native code that maps a list of argument
//! atoms to a result atom; a `GroundedPredicateNode` names native code that
//! maps arguments to a truth value. Both are looked up by node name in a
//! [`GroundedRegistry`], which the standard function executor and predicate
//! evaluator consult.
//!
//! This module also defines [`ExecError`], the error type shared by every
//! collaborator the instantiator talks to.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = GroundedRegistry::new();
//! registry.register_schema("first", |_: &AtomSpace, args: &[Handle]| -> ExecResult<Handle> {
//!     args.first().cloned().ok_or_else(|| ExecError::IncorrectArgument("no args".into()))
//! });
//! ```

mod traits;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::atomspace::AtomSpace;
use super::models::{Handle, TruthValue};

pub use traits::{GroundedPredicate, GroundedSchema};

/// Result type for collaborator calls.
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors raised by collaborators: executors, evaluators, registries, pattern engines.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecError {
    /// The atom cannot be evaluated to a truth value.
    /// The instantiator recovers from this one when firing `PutLink` results.
    NotEvaluatable(String),

    /// The atom cannot be executed to a value.
    NotExecutable(String),

    /// A `DefinedSchemaNode` / `DefinedPredicateNode` has no `DefineLink`.
    MissingDefinition(String),

    /// No grounded schema or predicate registered under this name.
    UnknownGrounded(String),

    /// Incorrect argument type or arity.
    IncorrectArgument(String),

    /// Arithmetic error (division by zero, ...).
    Arithmetic(String),

    /// Any other failure inside native code.
    Runtime(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::NotEvaluatable(msg) => write!(f, "Not evaluatable: {}", msg),
            ExecError::NotExecutable(msg) => write!(f, "Not executable: {}", msg),
            ExecError::MissingDefinition(msg) => write!(f, "Missing definition: {}", msg),
            ExecError::UnknownGrounded(msg) => write!(f, "Unknown grounded object: {}", msg),
            ExecError::IncorrectArgument(msg) => write!(f, "Incorrect argument: {}", msg),
            ExecError::Arithmetic(msg) => write!(f, "Arithmetic error: {}", msg),
            ExecError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {}

/// Registry of grounded schemas and predicates, keyed by node name.
#[derive(Clone, Default)]
pub struct GroundedRegistry {
    schemas: HashMap<String, Arc<dyn GroundedSchema>>,
    predicates: HashMap<String, Arc<dyn GroundedPredicate>>,
}

impl GroundedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under `name`, replacing any earlier one.
    pub fn register_schema(&mut self, name: impl Into<String>, schema: impl GroundedSchema + 'static) {
        self.schemas.insert(name.into(), Arc::new(schema));
    }

    /// Register a predicate under `name`, replacing any earlier one.
    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        predicate: impl GroundedPredicate + 'static,
    ) {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    pub fn schema(&self, name: &str) -> Option<Arc<dyn GroundedSchema>> {
        self.schemas.get(name).cloned()
    }

    pub fn predicate(&self, name: &str) -> Option<Arc<dyn GroundedPredicate>> {
        self.predicates.get(name).cloned()
    }

    /// Run the schema named by `schema_node` on `args`.
    pub fn execute(&self, space: &AtomSpace, schema_node: &Handle, args: &[Handle]) -> ExecResult<Handle> {
        let name = schema_node.name().unwrap_or_default();
        trace!(target: "atomese_instantiator::grounded::execute", name, nargs = args.len());
        let schema = self
            .schema(name)
            .ok_or_else(|| ExecError::UnknownGrounded(format!("schema {}", schema_node)))?;
        schema.execute(space, args)
    }

    /// Run the predicate named by `predicate_node` on `args`.
    pub fn evaluate(
        &self,
        space: &AtomSpace,
        predicate_node: &Handle,
        args: &[Handle],
    ) -> ExecResult<TruthValue> {
        let name = predicate_node.name().unwrap_or_default();
        trace!(target: "atomese_instantiator::grounded::evaluate", name, nargs = args.len());
        let predicate = self
            .predicate(name)
            .ok_or_else(|| ExecError::UnknownGrounded(format!("predicate {}", predicate_node)))?;
        predicate.evaluate(space, args)
    }
}

impl fmt::Debug for GroundedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemas: Vec<_> = self.schemas.keys().collect();
        let mut predicates: Vec<_> = self.predicates.keys().collect();
        schemas.sort();
        predicates.sort();
        f.debug_struct("GroundedRegistry")
            .field("schemas", &schemas)
            .field("predicates", &predicates)
            .finish()
    }
}

/// Members of an argument link; a node argument is passed alone.
pub(crate) fn argument_list(args: &Handle) -> Vec<Handle> {
    if args.is_node() {
        vec![args.clone()]
    } else {
        args.outgoing().to_vec()
    }
}
