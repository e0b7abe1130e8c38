//! Satisfying-set queries for `GetLink`.
//!
//! `(GetLink body)` / `(GetLink vardecl body)` asks for every grounding of
//! the variables under which `body` is present in the store. An `AndLink`
//! body is a conjunction of clauses whose groundings must agree. The answer
//! is a `SetLink` holding one member per distinct grounding: the value
//! itself for a single variable, or a `ListLink` of values in declaration
//! order.
//!
//! `(TypedVariableLink $x (TypeNode "ConceptNode"))` restricts `$x` to
//! atoms of exactly that type. Only `TypeNode` restrictions are understood.

mod matcher;

use tracing::debug;

use self::matcher::Matcher;
use super::atomspace::AtomSpace;
use super::execution::Variables;
use super::grounded::{ExecError, ExecResult};
use super::models::{Handle, HandleSeq, VariableMap};
use super::types::Type;

/// Runs `GetLink` queries.
pub trait PatternEngine: Send + Sync {
    fn satisfying_set(&self, space: &AtomSpace, get: &Handle) -> ExecResult<Handle>;
}

/// Backtracking matcher over the whole store.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPatternEngine;

impl StandardPatternEngine {
    fn destructure(get: &Handle) -> ExecResult<(Variables, Vec<(Handle, Type)>, Handle)> {
        if get.ty() != Type::GetLink {
            return Err(ExecError::IncorrectArgument(format!("expected a GetLink, got {}", get)));
        }
        match get.outgoing() {
            [body] => Ok((Variables::free_in(body), Vec::new(), body.clone())),
            [decl, body] => Ok((Variables::from_decl(decl)?, type_restrictions(decl)?, body.clone())),
            _ => Err(ExecError::IncorrectArgument(format!(
                "GetLink must have arity 1 or 2, got {}",
                get.arity()
            ))),
        }
    }

    fn search(
        matcher: &Matcher<'_>,
        clauses: &[Handle],
        candidates: &[Handle],
        bindings: &VariableMap,
        out: &mut Vec<VariableMap>,
    ) {
        let Some((clause, rest)) = clauses.split_first() else {
            out.push(bindings.clone());
            return;
        };
        for candidate in candidates {
            let mut scratch = bindings.clone();
            if matcher.match_term(clause, candidate, &mut scratch) {
                Self::search(matcher, rest, candidates, &scratch, out);
            }
        }
    }
}

impl PatternEngine for StandardPatternEngine {
    fn satisfying_set(&self, space: &AtomSpace, get: &Handle) -> ExecResult<Handle> {
        let (vars, types, body) = Self::destructure(get)?;
        let matcher = Matcher::new(vars.as_slice(), &types);

        let clauses: HandleSeq = if body.ty() == Type::AndLink {
            body.outgoing().to_vec()
        } else {
            vec![body]
        };

        // The query (and anything else still mentioning its variables) is
        // not a candidate grounding.
        let candidates: HandleSeq = space
            .atoms()
            .into_iter()
            .filter(|atom| !matcher.mentions_variables(atom))
            .collect();

        let mut groundings = Vec::new();
        Self::search(&matcher, &clauses, &candidates, &VariableMap::new(), &mut groundings);

        let mut members: HandleSeq = Vec::with_capacity(groundings.len());
        for grounding in &groundings {
            let values: Option<HandleSeq> = vars
                .as_slice()
                .iter()
                .map(|v| grounding.get(v).cloned())
                .collect();
            let member = match values {
                Some(mut values) if values.len() == 1 => values.remove(0),
                Some(values) => Handle::link(Type::ListLink, values),
                // A declared variable absent from the body is unconstrained.
                None => continue,
            };
            if !members.contains(&member) {
                members.push(member);
            }
        }
        // Store iteration order is arbitrary.
        members.sort_by_cached_key(|m| m.to_string());

        debug!(
            target: "atomese_instantiator::query::satisfying_set",
            %get, results = members.len()
        );
        Ok(space.add_link(Type::SetLink, members))
    }
}

/// `(variable, type)` pairs for every `TypedVariableLink` in `decl`.
fn type_restrictions(decl: &Handle) -> ExecResult<Vec<(Handle, Type)>> {
    let members = if decl.ty() == Type::VariableList {
        decl.outgoing()
    } else {
        std::slice::from_ref(decl)
    };
    let mut types = Vec::new();
    for member in members.iter().filter(|m| m.ty() == Type::TypedVariableLink) {
        let ty = match member.outgoing() {
            [_, restriction] if restriction.ty() == Type::TypeNode => {
                restriction.name().and_then(Type::from_name)
            }
            _ => None,
        };
        let Some(ty) = ty else {
            return Err(ExecError::IncorrectArgument(format!(
                "unsupported type restriction in {}",
                member
            )));
        };
        types.push((member.outgoing()[0].clone(), ty));
    }
    Ok(types)
}
