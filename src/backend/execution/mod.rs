//! Term instantiation.
//!
//! The [`Instantiator`] rewrites a term under a variable grounding: it
//! substitutes variables, strips quotation, beta-reduces `PutLink`s and
//! lambdas, and fires the executable links it meets (functions, folds,
//! deletions, queries) through its collaborators.
//!
//! The binder helpers in [`variables`] and [`scope`] are shared with the
//! function executor and the pattern engine.

pub mod errors;
mod instantiator;
pub mod scope;
pub mod variables;


pub use errors::{InstantiateError, InstantiateResult};
pub use instantiator::Instantiator;
pub use scope::{Lambda, Put};
pub use variables::Variables;
