//! Metadata checks for CHUK datasets.
//!
//! - [`MetadataValidator`] diffs global attributes against the CHUK vocabulary
//! - [`check_shapes`] compares dimension shapes with a reference grid
//! - [`to_json`] renders attributes as plain JSON for GeoTIFF tags
//! - [`require_attributes`] guards dataset creation

pub mod error;
pub mod json;
pub mod validator;
pub mod vocabulary;

pub use error::{MetadataError, MetadataResult};
pub use json::{
    attributes_from_json, attributes_to_json, to_json, value_from_json, value_to_json, DATASET_KEY,
    VARIABLE_KEY,
};
pub use validator::{
    check, check_shapes, require_attributes, Detail, Diagnostic, MetadataValidator, ShapeMap,
    ValidationReport, BAD_SHAPE, MISSING_GLOBAL_ATTRIBUTE,
};
pub use vocabulary::{CONVENTIONS, EXPECTED_GLOBAL_ATTRIBUTES, FORMAT_VERSION, NEW_DATASET_REQUIRED};
