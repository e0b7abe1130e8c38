//! Tests for the standard function executor.

use super::*;
use crate::backend::grounded::GroundedRegistry;

fn n(x: f64) -> Handle {
    Handle::number(x)
}

fn link(ty: Type, outgoing: Vec<Handle>) -> Handle {
    Handle::link(ty, outgoing)
}

fn exec(h: &Handle) -> ExecResult<Handle> {
    StandardExecutor::default().execute(&AtomSpace::new(), h)
}

#[test]
fn test_plus_and_times() {
    assert_eq!(exec(&link(Type::PlusLink, vec![n(1.0), n(2.0)])), Ok(n(3.0)));
    assert_eq!(exec(&link(Type::TimesLink, vec![n(2.0), n(3.0), n(4.0)])), Ok(n(24.0)));
    assert_eq!(exec(&link(Type::PlusLink, vec![])), Ok(n(0.0)));
}

#[test]
fn test_plus_keeps_symbolic_arguments() {
    let x = Handle::variable("$x");
    assert_eq!(
        exec(&link(Type::PlusLink, vec![n(1.0), x.clone(), n(2.0)])),
        Ok(link(Type::PlusLink, vec![x.clone(), n(3.0)]))
    );
    // Identity accumulator is dropped; a lone remainder is returned bare.
    assert_eq!(exec(&link(Type::PlusLink, vec![x.clone(), n(0.0)])), Ok(x));
}

#[test]
fn test_minus_and_divide() {
    assert_eq!(exec(&link(Type::MinusLink, vec![n(10.0), n(3.0), n(2.0)])), Ok(n(5.0)));
    assert_eq!(exec(&link(Type::MinusLink, vec![n(4.0)])), Ok(n(-4.0)));
    assert_eq!(exec(&link(Type::DivideLink, vec![n(12.0), n(4.0)])), Ok(n(3.0)));
    assert_eq!(exec(&link(Type::DivideLink, vec![n(4.0)])), Ok(n(0.25)));
}

#[test]
fn test_divide_by_zero() {
    assert!(matches!(
        exec(&link(Type::DivideLink, vec![n(1.0), n(0.0)])),
        Err(ExecError::Arithmetic(_))
    ));
}

#[test]
fn test_minus_without_arguments() {
    assert!(matches!(
        exec(&link(Type::MinusLink, vec![])),
        Err(ExecError::IncorrectArgument(_))
    ));
}

#[test]
fn test_symbolic_minus_is_unreduced() {
    let h = link(Type::MinusLink, vec![n(1.0), Handle::concept("A")]);
    assert_eq!(exec(&h), Ok(h));
}

#[test]
fn test_nested_functions_execute_first() {
    let inner = link(Type::PlusLink, vec![n(1.0), n(2.0)]);
    let outer = link(Type::TimesLink, vec![inner, n(5.0)]);
    assert_eq!(exec(&outer), Ok(n(15.0)));
}

#[test]
fn test_arity_and_concat() {
    assert_eq!(
        exec(&link(Type::ArityLink, vec![Handle::concept("a"), Handle::concept("b")])),
        Ok(n(2.0))
    );
    assert_eq!(
        exec(&link(Type::ConcatLink, vec![Handle::concept("ab"), Handle::concept("cd")])),
        Ok(Handle::concept("abcd"))
    );
    assert!(matches!(
        exec(&link(Type::ConcatLink, vec![link(Type::ListLink, vec![])])),
        Err(ExecError::IncorrectArgument(_))
    ));
}

#[test]
fn test_not_executable() {
    assert!(matches!(
        exec(&link(Type::ListLink, vec![])),
        Err(ExecError::NotExecutable(_))
    ));
}

#[test]
fn test_execution_output_grounded_schema() {
    let mut grounded = GroundedRegistry::new();
    grounded.register_schema("reverse", |_: &AtomSpace, args: &[Handle]| -> ExecResult<Handle> {
        let mut out = args.to_vec();
        out.reverse();
        Ok(Handle::link(Type::ListLink, out))
    });
    let executor = StandardExecutor::new(Arc::new(grounded));

    let eol = link(
        Type::ExecutionOutputLink,
        vec![
            Handle::node(Type::GroundedSchemaNode, "reverse"),
            link(Type::ListLink, vec![Handle::concept("A"), Handle::concept("B")]),
        ],
    );
    assert_eq!(
        executor.execute(&AtomSpace::new(), &eol),
        Ok(link(Type::ListLink, vec![Handle::concept("B"), Handle::concept("A")]))
    );
}

#[test]
fn test_execution_output_unknown_schema() {
    let eol = link(
        Type::ExecutionOutputLink,
        vec![Handle::node(Type::GroundedSchemaNode, "nope"), link(Type::ListLink, vec![])],
    );
    assert!(matches!(exec(&eol), Err(ExecError::UnknownGrounded(_))));
}

#[test]
fn test_execution_output_defined_lambda() {
    let space = AtomSpace::new();
    let name = Handle::node(Type::DefinedSchemaNode, "double");
    space.define(
        &name,
        &link(
            Type::LambdaLink,
            vec![Handle::variable("$x"), link(Type::PlusLink, vec![Handle::variable("$x"), Handle::variable("$x")])],
        ),
    );
    let eol = link(Type::ExecutionOutputLink, vec![name, link(Type::ListLink, vec![n(21.0)])]);
    assert_eq!(StandardExecutor::default().execute(&space, &eol), Ok(n(42.0)));
}

#[test]
fn test_execution_output_bad_shape() {
    let eol = link(Type::ExecutionOutputLink, vec![Handle::node(Type::GroundedSchemaNode, "x")]);
    assert!(matches!(exec(&eol), Err(ExecError::IncorrectArgument(_))));
}

#[test]
fn test_factory_checks_family() {
    let factory = StandardFactory;
    assert!(factory.build_fold(Type::PlusLink, vec![n(1.0)]).is_ok());
    assert!(factory.build_fold(Type::ArityLink, vec![]).is_err());
    assert!(factory.build_function(Type::ArityLink, vec![]).is_ok());
    assert!(factory.build_function(Type::ListLink, vec![]).is_err());
}
