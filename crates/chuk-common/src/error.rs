//! Error types for CHUK data handling.

use thiserror::Error;

/// Result type alias using ChukError.
pub type ChukResult<T> = Result<T, ChukError>;

/// Primary error type for grid and dataset operations.
#[derive(Debug, Error)]
pub enum ChukError {
    // === Grid Errors ===
    #[error("Grid data length {actual} does not match shape {shape:?} ({expected} cells)")]
    DataLength {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    // === Dataset Errors ===
    #[error("Variable not found: {0}")]
    MissingVariable(String),

    #[error("Dimension not found: {0}")]
    MissingDimension(String),

    #[error("Dimension '{name}' has size {existing}, cannot redefine as {requested}")]
    DimensionConflict {
        name: String,
        existing: usize,
        requested: usize,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid attribute '{name}': {message}")]
    InvalidAttribute { name: String, message: String },
}

impl ChukError {
    /// Short machine-readable code, used when reporting through the CLI.
    pub fn code(&self) -> &'static str {
        match self {
            ChukError::DataLength { .. } | ChukError::ShapeMismatch { .. } => "bad_shape",
            ChukError::MissingVariable(_) => "missing_variable",
            ChukError::MissingDimension(_) => "missing_dimension",
            ChukError::DimensionConflict { .. } => "dimension_conflict",
            ChukError::UnsupportedFormat(_) => "unsupported_format",
            ChukError::InvalidAttribute { .. } => "invalid_attribute",
        }
    }
}
