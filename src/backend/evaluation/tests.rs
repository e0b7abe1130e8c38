use super::*;

fn link(ty: Type, outgoing: Vec<Handle>) -> Handle {
    Handle::link(ty, outgoing)
}

fn eval(h: &Handle) -> ExecResult<TruthValue> {
    StandardEvaluator::default().evaluate(&AtomSpace::new(), h, true)
}

#[test]
fn test_constants_and_connectives() {
    let t = link(Type::TrueLink, vec![]);
    let f = link(Type::FalseLink, vec![]);
    assert_eq!(eval(&t), Ok(TruthValue::TRUE));
    assert_eq!(eval(&f), Ok(TruthValue::FALSE));
    assert_eq!(eval(&link(Type::NotLink, vec![f.clone()])), Ok(TruthValue::TRUE));
    assert_eq!(eval(&link(Type::AndLink, vec![t.clone(), f.clone()])), Ok(TruthValue::FALSE));
    assert_eq!(eval(&link(Type::OrLink, vec![f.clone(), t.clone()])), Ok(TruthValue::TRUE));
    assert_eq!(eval(&link(Type::AndLink, vec![])), Ok(TruthValue::TRUE));
}

#[test]
fn test_and_short_circuits() {
    // The second member is not evaluatable but is never reached.
    let h = link(
        Type::AndLink,
        vec![link(Type::FalseLink, vec![]), Handle::concept("junk")],
    );
    assert_eq!(eval(&h), Ok(TruthValue::FALSE));
}

#[test]
fn test_not_evaluatable() {
    assert!(matches!(
        eval(&link(Type::ListLink, vec![Handle::concept("A")])),
        Err(ExecError::NotEvaluatable(_))
    ));
    assert!(matches!(
        eval(&Handle::concept("A")),
        Err(ExecError::NotEvaluatable(_))
    ));
}

#[test]
fn test_grounded_predicate() {
    let mut grounded = GroundedRegistry::new();
    grounded.register_predicate(
        "nonempty",
        |_: &AtomSpace, args: &[Handle]| -> ExecResult<TruthValue> {
            Ok(TruthValue::from_bool(!args.is_empty()))
        },
    );
    let evaluator = StandardEvaluator::new(Arc::new(grounded));
    let gpn = Handle::node(Type::GroundedPredicateNode, "nonempty");

    let yes = link(
        Type::EvaluationLink,
        vec![gpn.clone(), link(Type::ListLink, vec![Handle::concept("A")])],
    );
    let no = link(Type::EvaluationLink, vec![gpn, link(Type::ListLink, vec![])]);
    assert_eq!(evaluator.evaluate(&AtomSpace::new(), &yes, true), Ok(TruthValue::TRUE));
    assert_eq!(evaluator.evaluate(&AtomSpace::new(), &no, true), Ok(TruthValue::FALSE));
}

#[test]
fn test_unknown_grounded_predicate() {
    let h = link(
        Type::EvaluationLink,
        vec![
            Handle::node(Type::GroundedPredicateNode, "missing"),
            link(Type::ListLink, vec![]),
        ],
    );
    assert!(matches!(eval(&h), Err(ExecError::UnknownGrounded(_))));
}

#[test]
fn test_defined_predicate() {
    let space = AtomSpace::new();
    let dpn = Handle::node(Type::DefinedPredicateNode, "is-true");
    space.define(
        &dpn,
        &link(Type::LambdaLink, vec![Handle::variable("$p"), link(Type::NotLink, vec![link(Type::NotLink, vec![Handle::variable("$p")])])]),
    );
    let h = link(
        Type::EvaluationLink,
        vec![dpn, link(Type::ListLink, vec![link(Type::TrueLink, vec![])])],
    );
    assert_eq!(StandardEvaluator::default().evaluate(&space, &h, true), Ok(TruthValue::TRUE));
}

#[test]
fn test_bare_defined_predicate() {
    let space = AtomSpace::new();
    let dpn = Handle::node(Type::DefinedPredicateNode, "always");
    space.define(&dpn, &link(Type::TrueLink, vec![]));
    assert_eq!(StandardEvaluator::default().evaluate(&space, &dpn, false), Ok(TruthValue::TRUE));

    let undefined = Handle::node(Type::DefinedPredicateNode, "never-defined");
    assert!(matches!(
        StandardEvaluator::default().evaluate(&space, &undefined, true),
        Err(ExecError::MissingDefinition(_))
    ));
}

#[test]
fn test_plain_evaluation_uses_stored_truth_value() {
    let space = AtomSpace::new();
    let h = link(
        Type::EvaluationLink,
        vec![
            Handle::node(Type::PredicateNode, "likes"),
            link(Type::ListLink, vec![Handle::concept("Bob"), Handle::concept("pie")]),
        ],
    );
    space.set_truth_value(&h, TruthValue::new(0.8, 0.9));

    let fresh = link(
        Type::EvaluationLink,
        vec![
            Handle::node(Type::PredicateNode, "likes"),
            link(Type::ListLink, vec![Handle::concept("Bob"), Handle::concept("pie")]),
        ],
    );
    assert_eq!(
        StandardEvaluator::default().evaluate(&space, &fresh, true),
        Ok(TruthValue::new(0.8, 0.9))
    );
}
