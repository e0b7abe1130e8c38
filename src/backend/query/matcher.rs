//! Structural matching of clauses against stored atoms.
//!
//! Only the declared variables bind; every other atom, including
//! undeclared variables, matches itself. Inside a `QuoteLink` even
//! declared variables are literal until an `UnquoteLink` restores them.
//! A variable declared with a `TypeNode` restriction binds only atoms of
//! exactly that type.

use tracing::trace;

use crate::backend::execution::variables::child_quote_depth;
use crate::backend::models::{Handle, VariableMap};
use crate::backend::types::Type;

pub(super) struct Matcher<'v> {
    vars: &'v [Handle],
    types: &'v [(Handle, Type)],
}

impl<'v> Matcher<'v> {
    pub(super) fn new(vars: &'v [Handle], types: &'v [(Handle, Type)]) -> Self {
        Matcher { vars, types }
    }

    fn admits(&self, var: &Handle, candidate: &Handle) -> bool {
        self.types
            .iter()
            .find(|(v, _)| v == var)
            .map_or(true, |(_, ty)| candidate.ty() == *ty)
    }

    /// True if any declared variable occurs in `h`.
    pub(super) fn mentions_variables(&self, h: &Handle) -> bool {
        if h.is_node() {
            return self.vars.contains(h);
        }
        h.outgoing().iter().any(|child| self.mentions_variables(child))
    }

    /// Extend `bindings` so that `pattern` grounds to `candidate`.
    ///
    /// On failure `bindings` may hold partial groundings; callers match on
    /// a scratch copy.
    pub(super) fn match_term(
        &self,
        pattern: &Handle,
        candidate: &Handle,
        bindings: &mut VariableMap,
    ) -> bool {
        trace!(target: "atomese_instantiator::query::match_term", %pattern, %candidate);
        self.match_at(pattern, candidate, 0, bindings)
    }

    fn match_at(
        &self,
        pattern: &Handle,
        candidate: &Handle,
        quote: usize,
        bindings: &mut VariableMap,
    ) -> bool {
        // Quote wrappers are transparent.
        if matches!(pattern.ty(), Type::QuoteLink | Type::UnquoteLink) && pattern.arity() == 1 {
            let depth = child_quote_depth(pattern.ty(), quote);
            return self.match_at(&pattern.outgoing()[0], candidate, depth, bindings);
        }

        if quote == 0 && self.vars.contains(pattern) {
            return match bindings.get(pattern) {
                Some(bound) => bound == candidate,
                None if !self.admits(pattern, candidate) => false,
                None => {
                    bindings.insert(pattern.clone(), candidate.clone());
                    true
                }
            };
        }

        if pattern.is_node() || candidate.is_node() {
            return pattern == candidate;
        }

        pattern.ty() == candidate.ty()
            && pattern.arity() == candidate.arity()
            && pattern
                .outgoing()
                .iter()
                .zip(candidate.outgoing())
                .all(|(p, c)| self.match_at(p, c, quote, bindings))
    }
}
