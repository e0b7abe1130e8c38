//! Function execution.
//!
//! The instantiator hands every `FunctionLink` it fires to a
//! [`FunctionExecutor`], and builds the links it fires through a
//! [`LinkFactory`]. [`StandardExecutor`] covers the function links in the
//! type hierarchy:
//!
//! - `PlusLink`, `TimesLink`, `MinusLink`, `DivideLink` - numeric folds
//! - `ArityLink` - number of arguments
//! - `ConcatLink` - concatenated node names
//! - `ExecutionOutputLink` - lambdas, defined schemas and grounded schemas
//!
//! Arguments that are themselves function links are executed first, which
//! is how lazily instantiated folds reduce their own arguments.

mod fold;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::debug;

use super::atomspace::AtomSpace;
use super::execution::Lambda;
use super::grounded::{argument_list, ExecError, ExecResult, GroundedRegistry};
use super::models::{Handle, HandleSeq};
use super::registry::{AtomSpaceRegistry, NodeRegistry};
use super::types::Type;

/// Reduces a function term to its value.
pub trait FunctionExecutor: Send + Sync {
    fn execute(&self, space: &AtomSpace, function: &Handle) -> ExecResult<Handle>;
}

/// Builds fold and function links from a type and an outgoing set.
pub trait LinkFactory: Send + Sync {
    fn build_fold(&self, ty: Type, outgoing: HandleSeq) -> ExecResult<Handle>;
    fn build_function(&self, ty: Type, outgoing: HandleSeq) -> ExecResult<Handle>;
}

/// Factory that validates the type family and builds a plain link.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFactory;

impl LinkFactory for StandardFactory {
    fn build_fold(&self, ty: Type, outgoing: HandleSeq) -> ExecResult<Handle> {
        if !ty.is_a(Type::FoldLink) {
            return Err(ExecError::IncorrectArgument(format!("{} is not a FoldLink", ty)));
        }
        Ok(Handle::link(ty, outgoing))
    }

    fn build_function(&self, ty: Type, outgoing: HandleSeq) -> ExecResult<Handle> {
        if !ty.is_a(Type::FunctionLink) {
            return Err(ExecError::IncorrectArgument(format!(
                "{} is not a FunctionLink",
                ty
            )));
        }
        Ok(Handle::link(ty, outgoing))
    }
}

/// Executor for the built-in function links and grounded schemas.
#[derive(Clone)]
pub struct StandardExecutor {
    grounded: Arc<GroundedRegistry>,
    registry: Arc<dyn NodeRegistry>,
}

impl StandardExecutor {
    pub fn new(grounded: Arc<GroundedRegistry>) -> Self {
        StandardExecutor {
            grounded,
            registry: Arc::new(AtomSpaceRegistry),
        }
    }

    pub fn with_registry(grounded: Arc<GroundedRegistry>, registry: Arc<dyn NodeRegistry>) -> Self {
        StandardExecutor { grounded, registry }
    }

    /// Execute nested function links among the arguments.
    fn reduce_args(&self, space: &AtomSpace, function: &Handle) -> ExecResult<HandleSeq> {
        function
            .outgoing()
            .iter()
            .map(|arg| {
                if arg.ty().is_a(Type::FunctionLink) {
                    self.execute(space, arg)
                } else {
                    Ok(arg.clone())
                }
            })
            .collect()
    }

    fn execute_output(&self, space: &AtomSpace, eol: &Handle) -> ExecResult<Handle> {
        let (schema, args) = match eol.outgoing() {
            [schema, args] => (schema, args),
            _ => {
                return Err(ExecError::IncorrectArgument(format!(
                    "ExecutionOutputLink must have arity 2, got {}",
                    eol.arity()
                )))
            }
        };

        let schema = if schema.ty() == Type::DefinedSchemaNode {
            self.registry.definition_of(space, schema)?
        } else {
            schema.clone()
        };

        match schema.ty() {
            Type::LambdaLink => {
                let reduced = Lambda::destructure(&schema)?.apply_nocheck(&argument_list(args));
                if reduced.ty().is_a(Type::FunctionLink) {
                    self.execute(space, &reduced)
                } else {
                    Ok(reduced)
                }
            }
            Type::GroundedSchemaNode => self.grounded.execute(space, &schema, &argument_list(args)),
            _ => Err(ExecError::NotExecutable(format!("schema {}", schema))),
        }
    }
}

impl Default for StandardExecutor {
    fn default() -> Self {
        Self::new(Arc::new(GroundedRegistry::new()))
    }
}

impl FunctionExecutor for StandardExecutor {
    fn execute(&self, space: &AtomSpace, function: &Handle) -> ExecResult<Handle> {
        debug!(target: "atomese_instantiator::reduct::execute", %function);
        match function.ty() {
            Type::ExecutionOutputLink => self.execute_output(space, function),
            Type::ArityLink => Ok(Handle::number(function.arity() as f64)),
            Type::ConcatLink => fold::concat(&self.reduce_args(space, function)?),
            Type::PlusLink | Type::TimesLink => {
                fold::sum_product(function.ty(), self.reduce_args(space, function)?)
            }
            Type::MinusLink | Type::DivideLink => {
                fold::difference_quotient(function.ty(), self.reduce_args(space, function)?)
            }
            _ => Err(ExecError::NotExecutable(function.to_string())),
        }
    }
}
