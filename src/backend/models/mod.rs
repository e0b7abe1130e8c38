pub mod atom;
pub mod truth_value;
pub mod variable_map;

pub use atom::{Atom, AtomKind, Handle};
pub use truth_value::TruthValue;
pub use variable_map::VariableMap;

/// Sequence of handles, e.g. an outgoing set under construction.
pub type HandleSeq = Vec<Handle>;
