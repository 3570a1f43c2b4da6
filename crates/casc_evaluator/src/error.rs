//! Faults that abort evaluation.

use casc_binder::TypeSymbol;
use thiserror::Error;

/// A fatal runtime fault. Unlike diagnostics, these stop the program.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    /// A runtime string that does not spell a value of the target type.
    #[error("cannot convert '{value}' to {ty}")]
    InvalidConversion { value: String, ty: TypeSymbol },

    /// A global read before its declaration ran.
    #[error("variable '{name}' is used before it is declared")]
    UninitializedVariable { name: String },

    #[error("call depth exceeded the limit of {limit}")]
    CallDepthExceeded { limit: usize },

    #[error("console error: {0}")]
    Console(#[from] std::io::Error),

    /// The bound tree broke a contract the binder guarantees.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EvaluationError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        EvaluationError::Internal(message.into())
    }
}
