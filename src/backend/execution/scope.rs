//! Binders: `LambdaLink` destructuring and `PutLink` beta-reduction.

use tracing::trace;

use super::variables::Variables;
use crate::backend::atomspace::AtomSpace;
use crate::backend::grounded::{ExecError, ExecResult};
use crate::backend::models::{Handle, HandleSeq};
use crate::backend::registry::NodeRegistry;
use crate::backend::types::Type;

/// A `LambdaLink` split into its variables and body.
#[derive(Debug, Clone)]
pub struct Lambda {
    pub variables: Variables,
    pub body: Handle,
}

impl Lambda {
    /// `(LambdaLink body)` binds the body's free variables;
    /// `(LambdaLink vardecl body)` binds the declared ones.
    pub fn destructure(lambda: &Handle) -> ExecResult<Self> {
        if lambda.ty() != Type::LambdaLink {
            return Err(ExecError::IncorrectArgument(format!(
                "expected a LambdaLink, got {}",
                lambda
            )));
        }
        match lambda.outgoing() {
            [body] => Ok(Lambda {
                variables: Variables::free_in(body),
                body: body.clone(),
            }),
            [decl, body] => Ok(Lambda {
                variables: Variables::from_decl(decl)?,
                body: body.clone(),
            }),
            _ => Err(ExecError::IncorrectArgument(format!(
                "LambdaLink must have arity 1 or 2, got {}",
                lambda.arity()
            ))),
        }
    }

    /// Plug `args` into the body without arity checking.
    pub fn apply_nocheck(&self, args: &[Handle]) -> Handle {
        self.variables.substitute_nocheck(&self.body, args)
    }
}

/// A `PutLink` split into its parts: `(PutLink body values)` or
/// `(PutLink vardecl body values)`.
#[derive(Debug, Clone)]
pub struct Put {
    pub vardecl: Option<Handle>,
    pub body: Handle,
    pub values: Handle,
}

impl Put {
    pub fn destructure(put: &Handle) -> ExecResult<Self> {
        match put.outgoing() {
            [body, values] => Ok(Put {
                vardecl: None,
                body: body.clone(),
                values: values.clone(),
            }),
            [decl, body, values] => Ok(Put {
                vardecl: Some(decl.clone()),
                body: body.clone(),
                values: values.clone(),
            }),
            _ => Err(ExecError::IncorrectArgument(format!(
                "PutLink must have arity 2 or 3, got {}",
                put.arity()
            ))),
        }
    }

    /// Same binder with different values.
    pub fn with_values(&self, values: Handle) -> Handle {
        let mut outgoing = HandleSeq::with_capacity(3);
        outgoing.extend(self.vardecl.iter().cloned());
        outgoing.push(self.body.clone());
        outgoing.push(values);
        Handle::link(Type::PutLink, outgoing)
    }

    /// Beta-reduce: plug the values into the body.
    ///
    /// - a `SetLink` of values maps the substitution over its members and
    ///   yields a `SetLink` of the reductions that succeeded
    /// - a `ListLink` with one member per variable is spread positionally
    /// - otherwise a single variable takes the values term whole
    ///
    /// Any other arity mismatch is `ExecError::IncorrectArgument`; only
    /// set members that do not fit are dropped silently.
    pub fn reduce(&self, registry: &dyn NodeRegistry, space: &AtomSpace) -> ExecResult<Handle> {
        let mut body = self.body.clone();
        if matches!(body.ty(), Type::DefinedSchemaNode | Type::DefinedPredicateNode) {
            body = registry.definition_of(space, &body)?;
            if body.ty() != Type::LambdaLink {
                return Err(ExecError::IncorrectArgument(format!(
                    "{} is not defined as a LambdaLink",
                    self.body
                )));
            }
        }

        let (vars, body) = if body.ty() == Type::LambdaLink {
            let lambda = Lambda::destructure(&body)?;
            (lambda.variables, lambda.body)
        } else {
            let vars = match &self.vardecl {
                Some(decl) => Variables::from_decl(decl)?,
                None => Variables::free_in(&body),
            };
            (vars, body)
        };

        let values = &self.values;
        let nvars = vars.len();
        trace!(
            target: "atomese_instantiator::execution::put",
            %body, %values, nvars
        );

        let reduced = match values.ty() {
            Type::SetLink => {
                let bset: HandleSeq = values
                    .outgoing()
                    .iter()
                    .filter_map(|member| {
                        if nvars == 1 {
                            vars.substitute(&body, std::slice::from_ref(member))
                        } else {
                            vars.substitute(&body, member.outgoing())
                        }
                    })
                    .collect();
                Some(Handle::link(Type::SetLink, bset))
            }
            Type::ListLink if values.arity() == nvars => vars.substitute(&body, values.outgoing()),
            _ if nvars == 1 => vars.substitute(&body, std::slice::from_ref(values)),
            _ => None,
        };
        reduced.ok_or_else(|| {
            ExecError::IncorrectArgument(format!(
                "{} does not fit {} variable(s) of {}",
                values, nvars, body
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::registry::AtomSpaceRegistry;

    fn var(name: &str) -> Handle {
        Handle::variable(name)
    }

    fn c(name: &str) -> Handle {
        Handle::concept(name)
    }

    fn link(ty: Type, outgoing: Vec<Handle>) -> Handle {
        Handle::link(ty, outgoing)
    }

    fn reduce(put: &Handle) -> ExecResult<Handle> {
        Put::destructure(put)
            .unwrap()
            .reduce(&AtomSpaceRegistry, &AtomSpace::new())
    }

    #[test]
    fn test_lambda_destructure() {
        let explicit = link(Type::LambdaLink, vec![var("$x"), link(Type::ListLink, vec![var("$x"), var("$y")])]);
        let lambda = Lambda::destructure(&explicit).unwrap();
        assert_eq!(lambda.variables.as_slice(), &[var("$x")]);

        let implicit = link(Type::LambdaLink, vec![link(Type::ListLink, vec![var("$y"), var("$x")])]);
        let lambda = Lambda::destructure(&implicit).unwrap();
        assert_eq!(lambda.variables.as_slice(), &[var("$y"), var("$x")]);

        assert!(Lambda::destructure(&link(Type::LambdaLink, vec![])).is_err());
        assert!(Lambda::destructure(&c("A")).is_err());
    }

    #[test]
    fn test_put_spreads_list_positionally() {
        let lambda = link(
            Type::LambdaLink,
            vec![
                link(Type::VariableList, vec![var("$a"), var("$b")]),
                link(Type::ListLink, vec![var("$b"), var("$a")]),
            ],
        );
        let put = link(Type::PutLink, vec![lambda, link(Type::ListLink, vec![c("A"), c("B")])]);
        assert_eq!(reduce(&put), Ok(link(Type::ListLink, vec![c("B"), c("A")])));
    }

    #[test]
    fn test_put_single_variable_takes_whole_value() {
        let put = link(
            Type::PutLink,
            vec![
                link(Type::InheritanceLink, vec![var("$x"), c("animal")]),
                c("cat"),
            ],
        );
        assert_eq!(
            reduce(&put),
            Ok(link(Type::InheritanceLink, vec![c("cat"), c("animal")]))
        );
    }

    #[test]
    fn test_put_single_variable_with_unit_list() {
        let lambda = link(Type::LambdaLink, vec![var("$x"), link(Type::ConcatLink, vec![var("$x"), var("$x")])]);
        let put = link(Type::PutLink, vec![lambda, link(Type::ListLink, vec![c("ab")])]);
        assert_eq!(
            reduce(&put),
            Ok(link(Type::ConcatLink, vec![c("ab"), c("ab")]))
        );
    }

    #[test]
    fn test_put_maps_over_set() {
        let put = link(
            Type::PutLink,
            vec![link(Type::ListLink, vec![var("$x")]), link(Type::SetLink, vec![c("A"), c("B")])],
        );
        let out = reduce(&put).unwrap();
        assert_eq!(out.ty(), Type::SetLink);
        assert_eq!(
            out.outgoing(),
            &[link(Type::ListLink, vec![c("A")]), link(Type::ListLink, vec![c("B")])]
        );
    }

    #[test]
    fn test_put_set_of_tuples_drops_mismatches() {
        let put = link(
            Type::PutLink,
            vec![
                link(Type::VariableList, vec![var("$a"), var("$b")]),
                link(Type::ListLink, vec![var("$a"), var("$b")]),
                link(
                    Type::SetLink,
                    vec![
                        link(Type::ListLink, vec![c("A"), c("B")]),
                        link(Type::ListLink, vec![c("C")]),
                    ],
                ),
            ],
        );
        let out = reduce(&put).unwrap();
        assert_eq!(out.outgoing(), &[link(Type::ListLink, vec![c("A"), c("B")])]);
    }

    #[test]
    fn test_put_arity_mismatch_is_an_error() {
        let put = link(
            Type::PutLink,
            vec![
                link(Type::ListLink, vec![var("$a"), var("$b")]),
                link(Type::ListLink, vec![c("A"), c("B"), c("C")]),
            ],
        );
        assert!(matches!(reduce(&put), Err(ExecError::IncorrectArgument(_))));
    }

    #[test]
    fn test_put_resolves_defined_schema() {
        let space = AtomSpace::new();
        let name = Handle::node(Type::DefinedSchemaNode, "pair");
        space.define(
            &name,
            &link(Type::LambdaLink, vec![var("$x"), link(Type::ListLink, vec![var("$x"), var("$x")])]),
        );
        let put = link(Type::PutLink, vec![name, c("A")]);
        let out = Put::destructure(&put)
            .unwrap()
            .reduce(&AtomSpaceRegistry, &space)
            .unwrap();
        assert_eq!(out, link(Type::ListLink, vec![c("A"), c("A")]));
    }

    #[test]
    fn test_with_values_keeps_vardecl() {
        let put = Put::destructure(&link(
            Type::PutLink,
            vec![var("$x"), link(Type::ListLink, vec![var("$x")]), c("A")],
        ))
        .unwrap();
        let rebuilt = put.with_values(c("B"));
        assert_eq!(rebuilt.arity(), 3);
        assert_eq!(rebuilt.outgoing()[2], c("B"));
    }
}
