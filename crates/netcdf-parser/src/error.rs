//! Error types for NetCDF reading and writing.

use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Error reported by the netcdf library
    #[error("NetCDF library error: {0}")]
    Library(#[from] netcdf::Error),

    /// Dataset model rejected what was read
    #[error(transparent)]
    Dataset(#[from] chuk_common::ChukError),
}
