use std::fmt;

#[derive(Debug)]
pub enum LogRegError {
    /// Shape or dimensionality mismatch
    ShapeMismatch { expected: String, got: String },

    /// An input vector or matrix has zero rows
    EmptyInput,

    /// Invalid hyperparameter or configuration
    InvalidParameter(String),

    /// The plotting backend failed while rendering
    Render(String),
}

impl fmt::Display for LogRegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for LogRegError {}

pub type Result<T> = std::result::Result<T, LogRegError>;
