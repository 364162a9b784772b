//! Common test fixtures for CHUK tests.
//!
//! This module provides pre-defined test data that represents common
//! scenarios in CHUK data curation.

use chuk_common::AttributeMap;

/// Land cover classes as `(flag_meaning, flag_value)` in declaration order.
///
/// Based on the UKCEH land cover map classes used by the merged CHUK
/// auxiliary land cover product, with an explicit no-data class.
pub const LAND_COVER_CLASSES: &[(&str, i8)] = &[
    ("No_data", 0),
    ("Deciduous_woodland", 1),
    ("Coniferous_woodland", 2),
    ("Arable", 3),
    ("Improved_grassland", 4),
    ("Neutral_grassland", 5),
    ("Calcareous_grassland", 6),
    ("Acid_grassland", 7),
    ("Fen", 8),
    ("Heather", 9),
    ("Heather_grassland", 10),
    ("Bog", 11),
    ("Inland_rock", 12),
    ("Saltwater", 13),
    ("Freshwater", 14),
    ("Supralittoral_rock", 15),
    ("Supralittoral_sediment", 16),
    ("Littoral_rock", 17),
    ("Littoral_sediment", 18),
    ("Saltmarsh", 19),
    ("Urban", 20),
    ("Suburban", 21),
];

/// The five-class example used throughout the mask documentation.
pub const SMALL_CLASSES: &[(&str, i8)] = &[
    ("No_data", 0),
    ("Deciduous_woodland", 1),
    ("Coniferous_woodland", 2),
    ("Urban", 3),
    ("Suburban", 4),
];

/// Space-separated `flag_meanings` attribute for a class table.
pub fn flag_meanings(classes: &[(&str, i8)]) -> String {
    classes
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `flag_values` attribute for a class table.
pub fn flag_values(classes: &[(&str, i8)]) -> Vec<i8> {
    classes.iter().map(|(_, code)| *code).collect()
}

/// Global attributes covering every key of the CHUK metadata vocabulary.
///
/// Values follow the constants used when migrating auxiliary products.
pub fn complete_global_attributes() -> AttributeMap {
    let mut attrs = AttributeMap::new();
    attrs.insert("title", "Distance to the GB Centroid");
    attrs.insert("institution", "EOCIS CHUK");
    attrs.insert("product_version", "1.0");
    attrs.insert("Conventions", "CF-1.10");
    attrs.insert(
        "summary",
        "The distance in km using the haversine formula to each CHUK grid location from the centroid of Great Britain",
    );
    attrs.insert("license", "Creative Commons Licence by attribution");
    attrs.insert("history", "created by test fixtures");
    attrs.insert("references", "https://eocis.org");
    attrs.insert("tracking_id", "6b7d3fa0-2c1e-4b8e-9a57-8f0e5f8d2b10");
    attrs.insert("format_version", "1.0");
    attrs.insert("keywords", "EOCIS,CHUK,test");
    attrs.insert("id", "EOCIS-CHUK-L4-TEST-MERGED-20231204-fv0.1.nc");
    attrs.insert("naming_authority", "EOCIS CHUK");
    attrs.insert("comment", "test dataset");
    attrs.insert("date_created", "2023-12-04T00:00:00Z");
    attrs.insert("creator_url", "https://eocis.org");
    attrs.insert("creator_name", "EOCIS");
    attrs.insert("creator_email", "eocis@example.org");
    attrs.insert("project", "Earth Observation Climate Information Service (EOCIS)");
    attrs.insert("geospatial_lat_min", "47.08929443");
    attrs.insert("geospatial_lat_max", "61.13276672");
    attrs.insert("geospatial_lon_min", "-15.37353897");
    attrs.insert("geospatial_lon_max", "61.13276672");
    attrs.insert("geospatial_vertical_min", "0.0");
    attrs.insert("geospatial_vertical_max", "0.0");
    attrs.insert("time_coverage_start", "20230101T000000Z");
    attrs.insert("time_coverage_end", "20231231T235959Z");
    attrs.insert("time_coverage_duration", "P1Y");
    attrs.insert("time_coverage_resolution", "P1Y");
    attrs.insert("platform", "none");
    attrs.insert("sensor", "none");
    attrs.insert("spatial_resolution", "1000m");
    attrs.insert("geospatial_lat_units", "degrees_north");
    attrs.insert("geospatial_lon_units", "degrees_east");
    attrs.insert("geospatial_lat_resolution", "0.00090");
    attrs.insert("geospatial_lon_resolution", "0.00153");
    attrs.insert("key_variables", "distances");
    attrs
}

/// Whitendale Hanging Stones, the centroid of Great Britain, as (lat, lon).
pub const GB_CENTROID: (f64, f64) = (54.0025, -2.5449);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_meanings_order() {
        let meanings = flag_meanings(SMALL_CLASSES);
        assert_eq!(
            meanings,
            "No_data Deciduous_woodland Coniferous_woodland Urban Suburban"
        );
        assert_eq!(flag_values(SMALL_CLASSES), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_land_cover_codes_are_unique() {
        let mut codes = flag_values(LAND_COVER_CLASSES);
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LAND_COVER_CLASSES.len());
    }

    #[test]
    fn test_complete_attributes_have_no_empty_values() {
        let attrs = complete_global_attributes();
        assert!(attrs.iter().all(|(_, v)| !v.is_empty()));
    }
}
