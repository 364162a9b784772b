//! Error types for metadata validation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A mandatory attribute is absent or empty.
    #[error("Required attribute {0} is missing or empty")]
    RequiredAttributeMissing(String),
}

pub type MetadataResult<T> = std::result::Result<T, MetadataError>;
