//! Atomese Instantiator - Term Rewriting over a Hypergraph Store
//!
//! This library rewrites Atomese terms (typed nodes and links held in an
//! interning `AtomSpace`) under a variable grounding. It is the piece that
//! turns a rule's conclusion or a query's template into concrete atoms.
//!
//! # Architecture
//!
//! The instantiation pipeline consists of one walker and its collaborators:
//!
//! 1. **Walker** (`backend::execution`)
//!    - Substitutes grounded variables and splices globs
//!    - Strips `QuoteLink` / `UnquoteLink` wrappers and suspends
//!      substitution inside quotes
//!    - Beta-reduces `PutLink`s and `LambdaLink` schemas
//!    - Fires executable links: functions, folds, deletions, queries
//!
//! 2. **Collaborators** (`backend::{reduct, evaluation, query, registry}`)
//!    - Function executor for arithmetic, arity, concatenation and
//!      `ExecutionOutputLink`s over grounded schemas
//!    - Predicate evaluator for boolean links and grounded predicates
//!    - Pattern engine answering `GetLink` queries
//!    - Node registry resolving `DefineLink` definitions
//!
//! # Example
//!
//! ```rust
//! use atomese_instantiator::backend::*;
//!
//! let space = AtomSpace::new();
//! let inst = Instantiator::new(space.clone());
//!
//! let x = Handle::variable("$x");
//! let vars: VariableMap = [(x.clone(), Handle::concept("A"))].into_iter().collect();
//! let expr = Handle::link(Type::ListLink, vec![x.clone(), x]);
//!
//! let out = inst.instantiate(&expr, &vars).unwrap().unwrap();
//! assert_eq!(
//!     out,
//!     Handle::link(Type::ListLink, vec![Handle::concept("A"), Handle::concept("A")])
//! );
//! assert!(space.contains(&out));
//! ```
//!
//! # Instantiation Strategy
//!
//! - **Eager** (default): arguments are instantiated before a link fires
//! - **Lazy**: executable links receive their arguments as written
//! - **Undefined results**: `DeleteLink` yields `None`, not an atom
//! - **Error Propagation**: the first collaborator error aborts the call,
//!   except `NotEvaluatable` while firing a `PutLink` result

pub mod backend;
pub mod config;
pub mod logging;

pub use backend::{
    AtomSpace, ExecError, Handle, InstantiateError, Instantiator, TruthValue, Type, VariableMap,
};
pub use config::{ConfigError, InstantiatorConfig, LogConfig};
