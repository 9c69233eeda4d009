use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid input for {operation}: {reason}")]
    InvalidInput {
        operation: &'static str,
        reason: String,
    },

    #[error("insufficient input: window of size {window} over a sequence of length {len}")]
    InsufficientInput { len: usize, window: usize },

    #[error("{operation}({n}) does not fit into u128")]
    Overflow { operation: &'static str, n: i64 },

    #[error("config error: {message}")]
    Config { message: String },
}

impl PatternError {
    pub fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            operation,
            reason: reason.into(),
        }
    }

    /// True for precondition violations, as opposed to well-formed queries without an answer.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type PatternResult<T> = Result<T, PatternError>;
