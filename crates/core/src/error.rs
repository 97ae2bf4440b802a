use thiserror::Error;

/// Errors raised while building an objective expression or a symbolic model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("parse error at offset {offset}: {reason}")]
    Parse { offset: usize, reason: String },

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{0}` is not a declared variable")]
    UndeclaredVariable(String),

    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(String),

    #[error("`{0}` is not a valid variable name")]
    InvalidVariable(String),

    #[error("at least one variable is required")]
    NoVariables,

    #[error("expression uses variable index {index} but only {count} variables are declared")]
    VariableOutOfRange { index: usize, count: usize },
}

impl ExpressionError {
    pub(crate) fn parse(offset: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            reason: reason.into(),
        }
    }
}
