//! Error types for mask construction and evaluation.

use netcdf_parser::NetCdfError;
use thiserror::Error;

/// Errors that can occur while building or evaluating masks.
#[derive(Error, Debug)]
pub enum MaskError {
    /// A category name or pattern matched no category of the raster.
    #[error("Value {token} does not match any values {}", .valid.join(","))]
    NoMatch { token: String, valid: Vec<String> },

    /// Malformed combination (no children, unknown operator, multi-child NOT).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Children of an AND/OR combination have different grid shapes.
    #[error("Mask shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The raster variable lacks usable flag metadata.
    #[error("Invalid flag metadata on variable {variable}: {message}")]
    InvalidFlags { variable: String, message: String },

    /// The raster accessor failed to read the variable.
    #[error("Failed to read raster: {0}")]
    Raster(#[from] NetCdfError),

    /// The in-memory dataset model rejected a request.
    #[error(transparent)]
    Dataset(#[from] chuk_common::ChukError),
}

/// Result type for mask operations.
pub type MaskResult<T> = std::result::Result<T, MaskError>;
