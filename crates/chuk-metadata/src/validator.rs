//! Attribute presence and grid shape checks.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chuk_common::AttributeMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{MetadataError, MetadataResult};
use crate::vocabulary::EXPECTED_GLOBAL_ATTRIBUTES;

/// Code of the warning emitted for an absent global attribute.
pub const MISSING_GLOBAL_ATTRIBUTE: &str = "missing_global_attribute";

/// Code of the error emitted for a dimension of unexpected shape.
pub const BAD_SHAPE: &str = "bad_shape";

/// Named dimension → shape.
pub type ShapeMap = BTreeMap<String, Vec<usize>>;

/// Payload of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Key(String),
    Shape {
        dimension: String,
        actual: Vec<usize>,
        expected: Vec<usize>,
    },
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Key(key) => write!(f, "{}", key),
            Detail::Shape {
                dimension,
                actual,
                expected,
            } => write!(
                f,
                "{} has shape {:?}, expected {:?}",
                dimension, actual, expected
            ),
        }
    }
}

/// One `(code, detail)` finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub detail: Detail,
}

impl Diagnostic {
    pub fn missing_attribute(key: impl Into<String>) -> Self {
        Self {
            code: MISSING_GLOBAL_ATTRIBUTE.to_string(),
            detail: Detail::Key(key.into()),
        }
    }

    pub fn bad_shape(dimension: impl Into<String>, actual: Vec<usize>, expected: Vec<usize>) -> Self {
        Self {
            code: BAD_SHAPE.to_string(),
            detail: Detail::Shape {
                dimension: dimension.into(),
                actual,
                expected,
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.detail)
    }
}

/// Warnings and errors collected by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Append another report's findings after this one's.
    pub fn merge(&mut self, other: ValidationReport) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }
}

/// Checks dataset metadata against a required-key set.
#[derive(Debug, Clone)]
pub struct MetadataValidator {
    required: BTreeSet<String>,
}

impl Default for MetadataValidator {
    /// A validator for the full CHUK global attribute vocabulary.
    fn default() -> Self {
        Self::new(EXPECTED_GLOBAL_ATTRIBUTES.iter().copied())
    }
}

impl MetadataValidator {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    /// Warn once, in key order, for every required key absent from `attrs`.
    ///
    /// Never produces errors and never fails.
    pub fn check(&self, attrs: &AttributeMap) -> ValidationReport {
        let warnings: Vec<Diagnostic> = self
            .required
            .iter()
            .filter(|key| !attrs.contains_key(key))
            .map(Diagnostic::missing_attribute)
            .collect();
        debug!(
            required = self.required.len(),
            missing = warnings.len(),
            "Checked global attributes"
        );
        ValidationReport {
            warnings,
            errors: Vec::new(),
        }
    }
}

/// Check `attrs` against an arbitrary set of required keys.
pub fn check<I, S>(attrs: &AttributeMap, required: I) -> ValidationReport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MetadataValidator::new(required).check(attrs)
}

/// Compare shapes of dimensions present in both maps.
///
/// Dimensions present on only one side are ignored.
pub fn check_shapes(actual: &ShapeMap, expected: &ShapeMap) -> Vec<Diagnostic> {
    actual
        .iter()
        .filter_map(|(dim, shape)| match expected.get(dim) {
            Some(want) if want != shape => {
                Some(Diagnostic::bad_shape(dim.clone(), shape.clone(), want.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Fail on the first of `keys` that is absent from `attrs` or holds an
/// empty value.
pub fn require_attributes(attrs: &AttributeMap, keys: &[&str]) -> MetadataResult<()> {
    for key in keys {
        match attrs.get(key) {
            Some(value) if !value.is_empty() => {}
            _ => return Err(MetadataError::RequiredAttributeMissing(key.to_string())),
        }
    }
    Ok(())
}
