//! Variable declarations and positional substitution (beta-reduction).
//!
//! Substitution is quote-aware and capture-avoiding:
//! - only variables at quotation depth 0 are replaced
//! - a nested `LambdaLink` / `GetLink` / `PutLink` that re-declares a
//!   variable shadows it inside its scope
//! - a `GlobNode` grounded by a `ListLink` is spliced into its parent
//!
//! Substituted values are never rescanned, so a value mentioning one of
//! the binder's own variables keeps it free.

use tracing::trace;

use crate::backend::grounded::{ExecError, ExecResult};
use crate::backend::models::{Handle, HandleSeq};
use crate::backend::types::Type;

/// Ordered sequence of declared variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    varseq: HandleSeq,
}

impl Variables {
    pub fn new(varseq: HandleSeq) -> Self {
        Variables { varseq }
    }

    /// Parse a variable declaration: a bare variable, a `TypedVariableLink`,
    /// or a `VariableList` of either.
    pub fn from_decl(decl: &Handle) -> ExecResult<Self> {
        let varseq = if decl.ty() == Type::VariableList {
            decl.outgoing()
                .iter()
                .map(declared_variable)
                .collect::<ExecResult<HandleSeq>>()?
        } else {
            vec![declared_variable(decl)?]
        };
        Ok(Variables { varseq })
    }

    /// Free variables of `body` in order of first occurrence.
    pub fn free_in(body: &Handle) -> Self {
        let mut varseq = HandleSeq::new();
        collect_free(body, 0, &mut Vec::new(), &mut varseq);
        Variables { varseq }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.varseq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.varseq.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Handle] {
        &self.varseq
    }

    pub fn contains(&self, var: &Handle) -> bool {
        self.varseq.contains(var)
    }

    fn index_of(&self, var: &Handle) -> Option<usize> {
        self.varseq.iter().position(|v| v == var)
    }

    /// Arity-checked substitution. `None` when the value count differs
    /// from the variable count.
    pub fn substitute(&self, body: &Handle, values: &[Handle]) -> Option<Handle> {
        if values.len() != self.varseq.len() {
            trace!(
                target: "atomese_instantiator::execution::substitute",
                expected = self.varseq.len(), got = values.len(), "arity mismatch"
            );
            return None;
        }
        Some(self.substitute_nocheck(body, values))
    }

    /// Positional substitution without arity checking. Extra values are
    /// ignored; variables without a value stay free.
    pub fn substitute_nocheck(&self, body: &Handle, values: &[Handle]) -> Handle {
        trace!(target: "atomese_instantiator::execution::substitute", %body, ?values);
        if self.varseq.is_empty() {
            return body.clone();
        }
        self.substitute_scoped(body, values, 0, &mut Vec::new())
    }

    fn grounding<'v>(&self, var: &Handle, values: &'v [Handle], shadowed: &[Handle]) -> Option<&'v Handle> {
        if shadowed.contains(var) {
            return None;
        }
        self.index_of(var).and_then(|i| values.get(i))
    }

    fn substitute_scoped(
        &self,
        term: &Handle,
        values: &[Handle],
        quote: usize,
        shadowed: &mut Vec<Handle>,
    ) -> Handle {
        if term.is_node() {
            if quote == 0 && term.ty().is_variable() {
                if let Some(value) = self.grounding(term, values, shadowed) {
                    return value.clone();
                }
            }
            return term.clone();
        }

        let child_quote = child_quote_depth(term.ty(), quote);
        let scope = if quote == 0 { scope_of(term) } else { None };

        let mut changed = false;
        let mut outgoing = HandleSeq::with_capacity(term.arity());
        for (i, child) in term.outgoing().iter().enumerate() {
            let mut pushed = 0;
            if let Some((declared, end)) = &scope {
                if i < *end {
                    for v in declared.iter().filter(|v| self.contains(v)) {
                        shadowed.push(v.clone());
                        pushed += 1;
                    }
                }
            }

            let glob_value = if child_quote == 0 && child.ty() == Type::GlobNode {
                self.grounding(child, values, shadowed)
                    .filter(|value| value.ty() == Type::ListLink)
            } else {
                None
            };

            match glob_value {
                Some(list) => {
                    outgoing.extend(list.outgoing().iter().cloned());
                    changed = true;
                }
                None => {
                    let sub = self.substitute_scoped(child, values, child_quote, shadowed);
                    changed |= !sub.same_ref(child);
                    outgoing.push(sub);
                }
            }

            shadowed.truncate(shadowed.len() - pushed);
        }

        if changed {
            Handle::link_with_tv(term.ty(), outgoing, term.truth_value())
        } else {
            term.clone()
        }
    }
}

fn declared_variable(h: &Handle) -> ExecResult<Handle> {
    match h.ty() {
        Type::VariableNode | Type::GlobNode => Ok(h.clone()),
        Type::TypedVariableLink => match h.outgoing_atom(0) {
            Some(v) if v.ty().is_variable() => Ok(v.clone()),
            _ => Err(ExecError::IncorrectArgument(format!(
                "malformed typed variable {}",
                h
            ))),
        },
        _ => Err(ExecError::IncorrectArgument(format!(
            "expected a variable declaration, got {}",
            h
        ))),
    }
}

#[inline]
pub(crate) fn child_quote_depth(ty: Type, quote: usize) -> usize {
    match ty {
        Type::QuoteLink => quote + 1,
        Type::UnquoteLink => quote.saturating_sub(1),
        _ => quote,
    }
}

/// Variables bound by a scope link, and how many leading children the
/// scope covers.
fn scope_of(term: &Handle) -> Option<(HandleSeq, usize)> {
    match (term.ty(), term.arity()) {
        (Type::LambdaLink | Type::GetLink, 1) => {
            let body = term.outgoing_atom(0)?;
            Some((Variables::free_in(body).varseq, 1))
        }
        (Type::LambdaLink | Type::GetLink, 2) => {
            let decl = term.outgoing_atom(0)?;
            Variables::from_decl(decl).ok().map(|v| (v.varseq, 2))
        }
        (Type::PutLink, 3) => {
            let decl = term.outgoing_atom(0)?;
            Variables::from_decl(decl).ok().map(|v| (v.varseq, 2))
        }
        _ => None,
    }
}

fn collect_free(term: &Handle, quote: usize, bound: &mut Vec<Handle>, out: &mut HandleSeq) {
    if term.is_node() {
        if quote == 0 && term.ty().is_variable() && !bound.contains(term) && !out.contains(term) {
            out.push(term.clone());
        }
        return;
    }

    let child_quote = child_quote_depth(term.ty(), quote);
    let scope = if quote == 0 { scope_of(term) } else { None };
    for (i, child) in term.outgoing().iter().enumerate() {
        let mut pushed = 0;
        if let Some((declared, end)) = &scope {
            if i < *end {
                bound.extend(declared.iter().cloned());
                pushed = declared.len();
            }
        }
        collect_free(child, child_quote, bound, out);
        bound.truncate(bound.len() - pushed);
    }
}
