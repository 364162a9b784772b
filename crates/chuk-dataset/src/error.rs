//! Error types for the dataset crate.

use thiserror::Error;

/// Errors that can occur while loading, building or saving datasets.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read or write NetCDF: {0}")]
    NetCdf(#[from] netcdf_parser::NetCdfError),

    #[error(transparent)]
    Dataset(#[from] chuk_common::ChukError),

    #[error(transparent)]
    Metadata(#[from] chuk_metadata::MetadataError),

    #[error("Unsupported format {suffix}, supported formats are {}", .supported.join(","))]
    UnsupportedFormat {
        suffix: String,
        supported: Vec<&'static str>,
    },

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Invalid GeoTIFF tags: {0}")]
    InvalidTags(String),

    #[error("Variable {variable} has shape {shape:?}, GeoTIFF export needs (y, x)")]
    NotTwoDimensional { variable: String, shape: Vec<usize> },

    #[error("GeoTIFF holds exactly one (y, x) variable, found {}", .candidates.join(","))]
    AmbiguousVariable { candidates: Vec<String> },
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
