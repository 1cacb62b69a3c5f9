//! Error types for ERG/OMTI analysis routines.

use thiserror::Error;

/// Result type alias using ErgError.
pub type Result<T> = std::result::Result<T, ErgError>;

/// Primary error type for the analysis kernels and pipeline operations.
#[derive(Debug, Error)]
pub enum ErgError {
    // === Input Errors ===
    /// A required named variable is absent from the store.
    ///
    /// Pipeline operations report this and return without output.
    #[error("Missing input variable: {0}")]
    MissingInput(String),

    /// Array shapes disagree, or map indices fall outside the sensor frame.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A rotation axis has (numerically) zero length.
    #[error("Rotation axis {index} has zero magnitude")]
    ZeroAxis { index: usize },

    /// Time samples are not strictly increasing.
    #[error("Time grid not strictly increasing at sample {index}")]
    UnorderedTimes { index: usize },

    /// A variable name does not follow the expected convention.
    #[error("Invalid variable name: {0}")]
    InvalidName(String),

    /// A stored variable holds a payload of the wrong kind.
    #[error("Variable '{name}' does not hold {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErgError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create a MissingInput error.
    pub fn missing_input(name: impl Into<String>) -> Self {
        Self::MissingInput(name.into())
    }

    /// Whether the pipeline should treat this error as a benign no-op.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ErgError::MissingInput(_))
    }
}

impl From<std::io::Error> for ErgError {
    fn from(err: std::io::Error) -> Self {
        ErgError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for ErgError {
    fn from(err: serde_yaml::Error) -> Self {
        ErgError::Config(format!("YAML error: {}", err))
    }
}

impl From<serde_json::Error> for ErgError {
    fn from(err: serde_json::Error) -> Self {
        ErgError::ShapeMismatch(format!("malformed record: {}", err))
    }
}
