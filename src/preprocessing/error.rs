//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// A column requested by name is not present in the table.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),
    /// A table was built with the same column name twice.
    #[error("Duplicate column: '{0}'")]
    DuplicateColumn(String),
    /// `transform` was called before `fit` or `fit_transform`.
    #[error("{0} is not fitted; call fit or fit_transform first")]
    NotFitted(&'static str),
    /// A column reached `transform` without a transformer fitted for it.
    #[error("No fitted transformer for column '{0}'")]
    UnseenColumn(String),
    /// A column does not have the table's row count.
    #[error("Length mismatch in column '{column}': expected {expected} rows, got {got}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// A column has a different data type than the operation requires.
    #[error("Type mismatch in column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },
    /// Invalid hyperparameter or configuration value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Failure raised by a wrapped transformer.
    #[error("Delegate error: {0}")]
    Delegate(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PreprocessingError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}
