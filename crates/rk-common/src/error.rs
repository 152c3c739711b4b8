//! Error types for rowkit.

use thiserror::Error;

/// Result type alias for rowkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by caller-supplied code (transforms, reporters).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for rowkit.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    // Cell and row errors (20-29)
    #[error("unknown cell type: {descriptor}")]
    UnknownType { descriptor: String },

    #[error("value rejected by {descriptor}: {reason}")]
    InvalidValue { descriptor: String, reason: String },

    #[error("cell holds {actual}, cannot read it as {expected}")]
    ValueMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot build a row without cells")]
    EmptyRow,

    #[error("cell index {index} out of range for row with {len} cells")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("row keys exhausted: u64::MAX has already been issued")]
    KeysExhausted,

    // Streaming errors (30-39)
    #[error("transform failed at row {index}: {source}")]
    TransformFailed { index: usize, source: BoxError },

    #[error("input table has no row at index {index} (length {len})")]
    MissingRow { index: usize, len: usize },

    #[error("progress reporting failed: {0}")]
    Progress(String),

    #[error("output append failed: {0}")]
    Append(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in structured log output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig(_) => 11,
            Error::SchemaValidation(_) => 12,
            Error::UnknownType { .. } => 20,
            Error::InvalidValue { .. } => 21,
            Error::ValueMismatch { .. } => 22,
            Error::EmptyRow => 23,
            Error::IndexOutOfRange { .. } => 24,
            Error::KeysExhausted => 25,
            Error::TransformFailed { .. } => 30,
            Error::MissingRow { .. } => 31,
            Error::Progress(_) => 32,
            Error::Append(_) => 33,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Whether this error was raised by caller-supplied transform code.
    pub fn is_transform_failure(&self) -> bool {
        matches!(self, Error::TransformFailed { .. })
    }
}
