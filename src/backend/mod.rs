// Backend for Atomese term instantiation
//
// This module provides the architecture where:
// - `models` / `types`: atoms, handles, truth values and the type hierarchy
// - `atomspace`: the interning store the instantiator writes into
// - `execution`: the instantiator (walker) and the binder helpers
// - `reduct`, `evaluation`, `query`, `registry`, `grounded`: the collaborators
//   the walker calls out to, each behind a narrow trait

pub mod atomspace;
pub mod evaluation;
pub mod execution;
pub mod grounded;
pub mod models;
pub mod query;
pub mod reduct;
pub mod registry;
pub mod types;

pub use atomspace::{AtomSpace, AtomSpaceStats};
pub use evaluation::{PredicateEvaluator, StandardEvaluator};
pub use execution::{InstantiateError, InstantiateResult, Instantiator, Lambda, Put, Variables};
pub use grounded::{ExecError, ExecResult, GroundedPredicate, GroundedRegistry, GroundedSchema};
pub use models::*;
pub use query::{PatternEngine, StandardPatternEngine};
pub use reduct::{FunctionExecutor, LinkFactory, StandardExecutor, StandardFactory};
pub use registry::{AtomSpaceRegistry, NodeRegistry};
pub use types::Type;
