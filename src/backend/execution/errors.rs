//! Errors raised while instantiating a term.

use std::fmt;

use crate::backend::grounded::ExecError;

pub type InstantiateResult<T> = Result<T, InstantiateError>;

#[derive(Debug, Clone, PartialEq)]
pub enum InstantiateError {
    /// `instantiate` was called without an expression.
    NullExpression,

    /// A link does not have the shape its rule requires, e.g. a
    /// `QuoteLink` that is about to be stripped but has arity != 1.
    InvalidShape(String),

    /// A `GlobNode` was grounded by something that cannot be spliced.
    ExpectedGlobList(String),

    /// A collaborator (registry, executor, evaluator, pattern engine) failed.
    Exec(ExecError),
}

impl fmt::Display for InstantiateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstantiateError::NullExpression => write!(f, "Asked to instantiate a null expression"),
            InstantiateError::InvalidShape(msg) => write!(f, "Invalid shape: {}", msg),
            InstantiateError::ExpectedGlobList(msg) => {
                write!(f, "Glob must be grounded by a link: {}", msg)
            }
            InstantiateError::Exec(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InstantiateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstantiateError::Exec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExecError> for InstantiateError {
    fn from(e: ExecError) -> Self {
        InstantiateError::Exec(e)
    }
}
