//! Predicate evaluation.
//!
//! The instantiator fires the result of every `PutLink` it reduces by
//! handing it to a [`PredicateEvaluator`]. Terms that are not predicates
//! answer [`ExecError::NotEvaluatable`], which the caller may swallow.
//!
//! [`StandardEvaluator`] understands:
//! - `EvaluationLink` over grounded, defined and plain predicates
//! - `TrueLink` / `FalseLink`
//! - `NotLink`, `AndLink`, `OrLink` with short-circuit semantics
//! - bare `DefinedPredicateNode`s

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{trace, warn};

use super::atomspace::AtomSpace;
use super::execution::Lambda;
use super::grounded::{argument_list, ExecError, ExecResult, GroundedRegistry};
use super::models::{Handle, TruthValue};
use super::registry::{AtomSpaceRegistry, NodeRegistry};
use super::types::Type;

/// Evaluates a term to a truth value.
pub trait PredicateEvaluator: Send + Sync {
    /// With `silent`, failures are reported only through the returned error.
    fn evaluate(&self, space: &AtomSpace, h: &Handle, silent: bool) -> ExecResult<TruthValue>;
}

/// Evaluator for the built-in boolean links and grounded predicates.
#[derive(Clone)]
pub struct StandardEvaluator {
    grounded: Arc<GroundedRegistry>,
    registry: Arc<dyn NodeRegistry>,
}

impl StandardEvaluator {
    pub fn new(grounded: Arc<GroundedRegistry>) -> Self {
        StandardEvaluator {
            grounded,
            registry: Arc::new(AtomSpaceRegistry),
        }
    }

    pub fn with_registry(grounded: Arc<GroundedRegistry>, registry: Arc<dyn NodeRegistry>) -> Self {
        StandardEvaluator { grounded, registry }
    }

    fn eval(&self, space: &AtomSpace, h: &Handle) -> ExecResult<TruthValue> {
        trace!(target: "atomese_instantiator::evaluation::eval", %h);
        match h.ty() {
            Type::TrueLink => Ok(TruthValue::TRUE),
            Type::FalseLink => Ok(TruthValue::FALSE),
            Type::NotLink => match h.outgoing() {
                [inner] => Ok(self.eval(space, inner)?.negate()),
                _ => Err(ExecError::IncorrectArgument(format!(
                    "NotLink must have arity 1, got {}",
                    h.arity()
                ))),
            },
            Type::AndLink => {
                for member in h.outgoing() {
                    if !self.eval(space, member)?.is_true() {
                        return Ok(TruthValue::FALSE);
                    }
                }
                Ok(TruthValue::TRUE)
            }
            Type::OrLink => {
                for member in h.outgoing() {
                    if self.eval(space, member)?.is_true() {
                        return Ok(TruthValue::TRUE);
                    }
                }
                Ok(TruthValue::FALSE)
            }
            Type::DefinedPredicateNode => {
                let body = self.registry.definition_of(space, h)?;
                self.eval(space, &body)
            }
            Type::EvaluationLink => self.eval_evaluation(space, h),
            _ => Err(ExecError::NotEvaluatable(h.to_string())),
        }
    }

    fn eval_evaluation(&self, space: &AtomSpace, h: &Handle) -> ExecResult<TruthValue> {
        let (predicate, args) = match h.outgoing() {
            [predicate, args] => (predicate, args),
            _ => return Ok(h.truth_value()),
        };

        match predicate.ty() {
            Type::GroundedPredicateNode => {
                self.grounded.evaluate(space, predicate, &argument_list(args))
            }
            Type::DefinedPredicateNode => {
                let definition = self.registry.definition_of(space, predicate)?;
                if definition.ty() != Type::LambdaLink {
                    return Err(ExecError::IncorrectArgument(format!(
                        "{} is not defined as a LambdaLink",
                        predicate
                    )));
                }
                let reduced = Lambda::destructure(&definition)?.apply_nocheck(&argument_list(args));
                self.eval(space, &reduced)
            }
            // A plain predicate: whatever the store says about this link.
            _ => Ok(space.get(h).map_or_else(|| h.truth_value(), |stored| stored.truth_value())),
        }
    }
}

impl Default for StandardEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(GroundedRegistry::new()))
    }
}

impl PredicateEvaluator for StandardEvaluator {
    fn evaluate(&self, space: &AtomSpace, h: &Handle, silent: bool) -> ExecResult<TruthValue> {
        let result = self.eval(space, h);
        if let Err(e) = &result {
            if !silent {
                warn!(target: "atomese_instantiator::evaluation::evaluate", atom = %h, error = %e);
            }
        }
        result
    }
}
