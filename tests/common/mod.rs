//! Shared builders for the integration tests.

#![allow(dead_code)]

use atomese_instantiator::backend::{Handle, Type, VariableMap};

pub fn c(name: &str) -> Handle {
    Handle::concept(name)
}

pub fn var(name: &str) -> Handle {
    Handle::variable(name)
}

pub fn num(value: f64) -> Handle {
    Handle::number(value)
}

pub fn link(ty: Type, outgoing: Vec<Handle>) -> Handle {
    Handle::link(ty, outgoing)
}

pub fn list(outgoing: Vec<Handle>) -> Handle {
    link(Type::ListLink, outgoing)
}

pub fn bind(pairs: &[(Handle, Handle)]) -> VariableMap {
    pairs.iter().cloned().collect()
}
