//! Controlled vocabulary of CHUK global attributes.

/// Global attributes every published CHUK dataset is expected to carry.
pub const EXPECTED_GLOBAL_ATTRIBUTES: &[&str] = &[
    "title",
    "institution",
    "product_version",
    "Conventions",
    "summary",
    "license",
    "history",
    "references",
    "tracking_id",
    "format_version",
    "keywords",
    "id",
    "naming_authority",
    "comment",
    "date_created",
    "creator_url",
    "creator_name",
    "creator_email",
    "project",
    "geospatial_lat_min",
    "geospatial_lat_max",
    "geospatial_lon_min",
    "geospatial_lon_max",
    "geospatial_vertical_min",
    "geospatial_vertical_max",
    "time_coverage_start",
    "time_coverage_end",
    "time_coverage_duration",
    "time_coverage_resolution",
    "platform",
    "sensor",
    "spatial_resolution",
    "geospatial_lat_units",
    "geospatial_lon_units",
    "geospatial_lat_resolution",
    "geospatial_lon_resolution",
    "key_variables",
];

/// Attributes that must be non-empty before a new dataset is created.
pub const NEW_DATASET_REQUIRED: &[&str] = &["title", "institution", "product_version", "tracking_id"];

/// Value written to `Conventions` on new datasets.
pub const CONVENTIONS: &str = "CF-1.10";

/// Value written to `format_version` on new datasets.
pub const FORMAT_VERSION: &str = "0.1";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let unique: HashSet<_> = EXPECTED_GLOBAL_ATTRIBUTES.iter().collect();
        assert_eq!(unique.len(), EXPECTED_GLOBAL_ATTRIBUTES.len());
        assert_eq!(unique.len(), 37);
    }

    #[test]
    fn test_required_keys_are_in_vocabulary() {
        for key in NEW_DATASET_REQUIRED {
            assert!(EXPECTED_GLOBAL_ATTRIBUTES.contains(key), "{}", key);
        }
    }
}
