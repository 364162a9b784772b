//! Global attributes supplied when creating a new dataset.

use chrono::{DateTime, Utc};
use chuk_common::{AttrValue, AttributeMap};
use chuk_metadata::{CONVENTIONS, FORMAT_VERSION};
use uuid::Uuid;

/// Well-known attributes of a new dataset plus free-form extras.
///
/// `title`, `institution`, `product_version` and `tracking_id` must be
/// non-empty; this is checked when the dataset is created, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDatasetAttributes {
    pub title: String,
    pub institution: String,
    pub product_version: String,
    pub tracking_id: String,
    pub summary: Option<String>,
    /// Additional attributes. Never override the well-known ones above.
    pub extra: AttributeMap,
}

impl NewDatasetAttributes {
    /// Attributes with a freshly generated tracking ID.
    pub fn new(
        title: impl Into<String>,
        institution: impl Into<String>,
        product_version: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            institution: institution.into(),
            product_version: product_version.into(),
            tracking_id: generate_tracking_id(),
            summary: None,
            extra: AttributeMap::new(),
        }
    }

    pub fn with_tracking_id(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = tracking_id.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.extra.insert(name, value);
        self
    }

    /// Render as global attributes, stamping `Conventions`, `format_version`
    /// and `date_created`.
    pub fn to_attribute_map(&self, created: DateTime<Utc>) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.insert("title", self.title.as_str());
        attrs.insert("institution", self.institution.as_str());
        attrs.insert("product_version", self.product_version.as_str());
        attrs.insert("tracking_id", self.tracking_id.as_str());
        if let Some(summary) = &self.summary {
            attrs.insert("summary", summary.as_str());
        }
        attrs.insert("Conventions", CONVENTIONS);
        attrs.insert("format_version", FORMAT_VERSION);
        attrs.insert("date_created", format_timestamp(created));

        for (name, value) in self.extra.iter() {
            attrs.insert_if_absent(name, value.clone());
        }
        attrs
    }
}

/// A random (v4) UUID as text.
pub fn generate_tracking_id() -> String {
    Uuid::new_v4().to_string()
}

/// ISO 8601 UTC timestamp with second precision.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
