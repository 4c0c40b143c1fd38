//! Error types for detvis

use thiserror::Error;

/// Main error type for detvis operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rotation axis {0}, expected 0, 1 or 2")]
    InvalidAxis(usize),

    #[error("invalid mode: {0}")]
    InvalidMode(String),

    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    #[error("scene is closed; no further operations are permitted")]
    ResourceClosed,

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("visualization error: {0}")]
    Visualization(String),
}

impl Error {
    /// Shorthand for a [`Error::ShapeMismatch`] with formatted operands
    pub fn shape_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::ShapeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Result type alias for detvis operations
pub type Result<T> = std::result::Result<T, Error>;
