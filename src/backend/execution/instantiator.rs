//! The recursive walker behind [`Instantiator::instantiate`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::errors::{InstantiateError, InstantiateResult};
use super::scope::{Lambda, Put};
use crate::backend::atomspace::AtomSpace;
use crate::backend::evaluation::{PredicateEvaluator, StandardEvaluator};
use crate::backend::grounded::{argument_list, ExecError, GroundedRegistry};
use crate::backend::models::{Handle, HandleSeq, VariableMap};
use crate::backend::query::{PatternEngine, StandardPatternEngine};
use crate::backend::reduct::{FunctionExecutor, LinkFactory, StandardExecutor, StandardFactory};
use crate::backend::registry::{AtomSpaceRegistry, NodeRegistry};
use crate::backend::types::Type;
use crate::config::InstantiatorConfig;

/// Rewrites terms against a store.
///
/// Holds the store and the collaborators it calls out to. Construction
/// picks eager or lazy mode once; each [`instantiate`](Self::instantiate)
/// call starts from fresh quotation counters, so an instantiator can be
/// reused freely. Distinct instantiators over one (shared) store may run
/// on different threads.
///
/// # Example
///
/// ```ignore
/// let space = AtomSpace::new();
/// let inst = Instantiator::new(space.clone());
///
/// let x = Handle::variable("$x");
/// let vars: VariableMap = [(x.clone(), Handle::concept("A"))].into_iter().collect();
/// let out = inst.instantiate(&Handle::link(Type::ListLink, vec![x.clone(), x]), &vars)?;
/// // => Some((ListLink (ConceptNode "A") (ConceptNode "A")))
/// ```
#[derive(Clone)]
pub struct Instantiator {
    space: AtomSpace,
    eager: bool,
    registry: Arc<dyn NodeRegistry>,
    executor: Arc<dyn FunctionExecutor>,
    evaluator: Arc<dyn PredicateEvaluator>,
    pattern_engine: Arc<dyn PatternEngine>,
    factory: Arc<dyn LinkFactory>,
}

impl Instantiator {
    /// Eager instantiator with the standard collaborators and no grounded code.
    pub fn new(space: AtomSpace) -> Self {
        Self::with_grounded(space, Arc::new(GroundedRegistry::new()))
    }

    /// Eager instantiator whose executor and evaluator consult `grounded`.
    pub fn with_grounded(space: AtomSpace, grounded: Arc<GroundedRegistry>) -> Self {
        Instantiator {
            space,
            eager: true,
            registry: Arc::new(AtomSpaceRegistry),
            executor: Arc::new(StandardExecutor::new(grounded.clone())),
            evaluator: Arc::new(StandardEvaluator::new(grounded)),
            pattern_engine: Arc::new(StandardPatternEngine),
            factory: Arc::new(StandardFactory),
        }
    }

    pub fn with_config(space: AtomSpace, config: &InstantiatorConfig) -> Self {
        Self::new(space).eager(config.eager)
    }

    /// Choose eager (walk arguments before firing) or lazy mode.
    pub fn eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn NodeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn FunctionExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn PredicateEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_pattern_engine(mut self, pattern_engine: Arc<dyn PatternEngine>) -> Self {
        self.pattern_engine = pattern_engine;
        self
    }

    pub fn with_factory(mut self, factory: Arc<dyn LinkFactory>) -> Self {
        self.factory = factory;
        self
    }

    #[inline]
    pub fn is_eager(&self) -> bool {
        self.eager
    }

    #[inline]
    pub fn space(&self) -> &AtomSpace {
        &self.space
    }

    /// Instantiate `expr` under `vars` and intern the result.
    ///
    /// `Ok(None)` is the undefined result: a `DeleteLink` at the top, or a
    /// `PutLink` whose values do not fit its variables.
    pub fn instantiate<'h>(
        &self,
        expr: impl Into<Option<&'h Handle>>,
        vars: &VariableMap,
    ) -> InstantiateResult<Option<Handle>> {
        let expr = expr.into().ok_or(InstantiateError::NullExpression)?;
        debug!(
            target: "atomese_instantiator::execution::instantiate",
            %expr, nvars = vars.len(), eager = self.eager
        );
        let mut walker = Walker {
            inst: self,
            vars,
            quote_level: 0,
            preserve_quotes: 0,
            halt: false,
        };
        let walked = walker.walk(expr)?;
        Ok(walked.map(|h| self.space.add_atom(&h)))
    }
}

impl fmt::Debug for Instantiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instantiator")
            .field("space", &self.space)
            .field("eager", &self.eager)
            .finish_non_exhaustive()
    }
}

/// State of one `instantiate` call.
struct Walker<'a> {
    inst: &'a Instantiator,
    vars: &'a VariableMap,
    /// Depth of enclosing `QuoteLink`s, less enclosing `UnquoteLink`s.
    quote_level: usize,
    /// Positive while walking arguments whose quotes must survive.
    preserve_quotes: usize,
    /// Set while expanding a variable's grounding; blocks a second expansion.
    halt: bool,
}

impl Walker<'_> {
    fn walk(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        let saved = (self.quote_level, self.preserve_quotes);
        let result = self.walk_inner(h);
        (self.quote_level, self.preserve_quotes) = saved;
        result
    }

    fn walk_inner(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        trace!(
            target: "atomese_instantiator::execution::walk",
            atom = %h, quote = self.quote_level, preserve = self.preserve_quotes
        );
        let ty = h.ty();

        match ty {
            Type::QuoteLink => self.quote_level += 1,
            Type::UnquoteLink => self.quote_level = self.quote_level.saturating_sub(1),
            _ => {}
        }

        if self.preserve_quotes == 0
            && ((self.quote_level == 1 && ty == Type::QuoteLink)
                || (self.quote_level == 0 && ty == Type::UnquoteLink))
        {
            return match h.outgoing() {
                [inner] => self.walk(inner),
                _ => Err(InstantiateError::InvalidShape(format!(
                    "{} must have arity 1, got {}",
                    ty,
                    h.arity()
                ))),
            };
        }

        if h.is_node() {
            return self.walk_node(h);
        }

        if self.quote_level > 0 {
            return self.walk_generic(h);
        }

        let inst = self.inst;
        let registry = inst.registry.as_ref();
        match ty {
            Type::PutLink => self.walk_put(h),
            Type::ExecutionOutputLink => self.walk_execution_output(h),
            Type::DeleteLink => self.walk_delete(h),
            _ if registry.is_a(ty, Type::FoldLink) => self.walk_function(h, true),
            _ if registry.is_a(ty, Type::FunctionLink) => self.walk_function(h, false),
            Type::GetLink => self.walk_get(h),
            _ => self.walk_generic(h),
        }
    }

    fn walk_node(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        if self.quote_level > 0 {
            return Ok(Some(h.clone()));
        }
        if h.ty() == Type::DefinedSchemaNode {
            let definition = self.inst.registry.definition_of(&self.inst.space, h)?;
            return self.walk(&definition);
        }
        if !h.ty().is_variable() {
            return Ok(Some(h.clone()));
        }

        let vars = self.vars;
        let Some(value) = vars.get(h) else {
            return Ok(Some(h.clone()));
        };
        if self.halt {
            return Ok(Some(h.clone()));
        }
        self.halt = true;
        let result = self.walk(value);
        self.halt = false;
        result
    }

    /// Walk each child in order. Returns the new sequence and whether it
    /// differs from `seq`.
    fn walk_sequence(&mut self, seq: &[Handle]) -> InstantiateResult<(HandleSeq, bool)> {
        let mut out = HandleSeq::with_capacity(seq.len());
        let mut changed = false;
        for child in seq {
            let Some(walked) = self.walk(child)? else {
                changed = true;
                continue;
            };

            if self.quote_level == 0 && child.ty() == Type::GlobNode && !walked.same_ref(child) {
                if !walked.is_link() {
                    return Err(InstantiateError::ExpectedGlobList(format!(
                        "{} grounded by {}",
                        child, walked
                    )));
                }
                out.extend(walked.outgoing().iter().cloned());
                changed = true;
                continue;
            }

            changed |= !walked.same_ref(child);
            out.push(walked);
        }
        Ok((out, changed))
    }

    /// Walk with quotes preserved, for terms handed to opaque collaborators.
    fn walk_preserving(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        self.preserve_quotes += 1;
        let result = self.walk(h);
        self.preserve_quotes -= 1;
        result
    }

    fn walk_put(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        let mut put = Put::destructure(h).map_err(shape_error)?;

        if self.inst.eager {
            let values = self
                .walk(&put.values)?
                .ok_or_else(|| InstantiateError::InvalidShape(format!("values of {} are undefined", h)))?;
            if !values.same_ref(&put.values) {
                let rebuilt = put.with_values(values);
                trace!(target: "atomese_instantiator::execution::walk_put", put = %rebuilt);
                put = Put::destructure(&rebuilt).map_err(shape_error)?;
            }
        }

        let reduced = put
            .reduce(&*self.inst.registry, &self.inst.space)
            .map_err(shape_error)?;

        let Some(result) = self.walk(&reduced)? else {
            return Ok(None);
        };

        // Fire the result; only the side effects matter.
        if result.ty() == Type::SetLink {
            for member in result.outgoing() {
                self.fire(member)?;
            }
        } else {
            self.fire(&result)?;
        }
        Ok(Some(result))
    }

    fn fire(&self, h: &Handle) -> InstantiateResult<()> {
        match self.inst.evaluator.evaluate(&self.inst.space, h, true) {
            Ok(tv) => {
                debug!(target: "atomese_instantiator::execution::fire", atom = %h, %tv);
                Ok(())
            }
            Err(ExecError::NotEvaluatable(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn walk_execution_output(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        let (schema, args) = match h.outgoing() {
            [schema, args] => (schema, args),
            _ => {
                return Err(InstantiateError::InvalidShape(format!(
                    "ExecutionOutputLink must have arity 2, got {}",
                    h.arity()
                )))
            }
        };

        let args = self
            .walk_preserving(args)?
            .ok_or_else(|| InstantiateError::InvalidShape(format!("arguments of {} are undefined", h)))?;

        let schema = if schema.ty() == Type::DefinedSchemaNode {
            self.inst.registry.definition_of(&self.inst.space, schema)?
        } else {
            schema.clone()
        };

        if schema.ty() == Type::LambdaLink {
            let lambda = Lambda::destructure(&schema).map_err(shape_error)?;
            let body = lambda.apply_nocheck(&argument_list(&args));
            return self.walk(&body);
        }

        let eol = Handle::link(Type::ExecutionOutputLink, vec![schema, args]);
        debug!(target: "atomese_instantiator::execution::execute", %eol);
        Ok(Some(self.inst.executor.execute(&self.inst.space, &eol)?))
    }

    fn walk_delete(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        let (targets, _) = self.walk_sequence(h.outgoing())?;
        for target in targets.iter().filter(|t| !t.ty().is_variable()) {
            let removed = self.inst.space.remove_atom(target, true);
            debug!(target: "atomese_instantiator::execution::walk_delete", atom = %target, removed);
        }
        Ok(None)
    }

    fn walk_function(&mut self, h: &Handle, fold: bool) -> InstantiateResult<Option<Handle>> {
        let outgoing = if self.inst.eager {
            self.walk_sequence(h.outgoing())?.0
        } else {
            h.outgoing().to_vec()
        };

        let factory = self.inst.factory.as_ref();
        let function = if fold {
            factory.build_fold(h.ty(), outgoing)?
        } else {
            factory.build_function(h.ty(), outgoing)?
        };
        debug!(target: "atomese_instantiator::execution::execute", %function);
        Ok(Some(self.inst.executor.execute(&self.inst.space, &function)?))
    }

    fn walk_get(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        let get = if self.inst.eager {
            self.preserve_quotes += 1;
            let walked = self.walk_sequence(h.outgoing());
            self.preserve_quotes -= 1;
            let outgoing: HandleSeq = walked?
                .0
                .iter()
                .map(|child| self.inst.space.add_atom(child))
                .collect();
            Handle::link(Type::GetLink, outgoing)
        } else {
            h.clone()
        };
        debug!(target: "atomese_instantiator::execution::walk_get", %get);
        Ok(Some(self.inst.pattern_engine.satisfying_set(&self.inst.space, &get)?))
    }

    fn walk_generic(&mut self, h: &Handle) -> InstantiateResult<Option<Handle>> {
        let (outgoing, changed) = self.walk_sequence(h.outgoing())?;
        if !changed {
            return Ok(Some(h.clone()));
        }
        let rebuilt = Handle::link_with_tv(h.ty(), outgoing, h.truth_value());
        Ok(Some(self.inst.space.add_atom(&rebuilt)))
    }
}

/// Malformed binders surface as shape errors; other failures pass through.
fn shape_error(e: ExecError) -> InstantiateError {
    match e {
        ExecError::IncorrectArgument(msg) => InstantiateError::InvalidShape(msg),
        other => InstantiateError::Exec(other),
    }
}
