//! Coordinate Reference System types for CHUK grids.
//!
//! CHUK data lives on the British National Grid. The projection is carried
//! in a scalar `crsOSGB` variable referenced from each data variable's
//! `grid_mapping` attribute, with 2D `lat`/`lon` auxiliary coordinates in
//! WGS84.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attrs::AttributeMap;

/// Name of the grid mapping variable in CHUK files.
pub const CRS_VARIABLE: &str = "crsOSGB";

/// CRS codes that appear in CHUK files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChukCrs {
    /// OSGB 1936 / British National Grid (metres)
    Epsg27700,
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
}

impl ChukCrs {
    /// Parse a CRS string such as "EPSG:27700" (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EPSG:27700" => Some(ChukCrs::Epsg27700),
            "EPSG:4326" | "CRS:84" => Some(ChukCrs::Epsg4326),
            _ => None,
        }
    }

    /// CF grid mapping attributes for this CRS.
    pub fn grid_mapping_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        match self {
            ChukCrs::Epsg27700 => {
                attrs.insert("grid_mapping_name", "transverse_mercator");
                attrs.insert("semi_major_axis", 6377563.396);
                attrs.insert("inverse_flattening", 299.3249646);
                attrs.insert("longitude_of_prime_meridian", 0.0);
                attrs.insert("latitude_of_projection_origin", 49.0);
                attrs.insert("longitude_of_central_meridian", -2.0);
                attrs.insert("scale_factor_at_central_meridian", 0.9996012717);
                attrs.insert("false_easting", 400000.0);
                attrs.insert("false_northing", -100000.0);
                attrs.insert("unit", "metre");
                attrs.insert("spatial_ref", "EPSG:27700");
            }
            ChukCrs::Epsg4326 => {
                attrs.insert("grid_mapping_name", "latitude_longitude");
                attrs.insert("semi_major_axis", 6378137.0);
                attrs.insert("inverse_flattening", 298.257223563);
                attrs.insert("longitude_of_prime_meridian", 0.0);
                attrs.insert("spatial_ref", "EPSG:4326");
            }
        }
        attrs
    }

    /// Numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        match self {
            ChukCrs::Epsg27700 => 27700,
            ChukCrs::Epsg4326 => 4326,
        }
    }

    /// CRS for a numeric EPSG code, if it is one CHUK uses.
    pub fn from_epsg(code: u32) -> Option<Self> {
        match code {
            27700 => Some(ChukCrs::Epsg27700),
            4326 => Some(ChukCrs::Epsg4326),
            _ => None,
        }
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, ChukCrs::Epsg4326)
    }
}

impl Default for ChukCrs {
    fn default() -> Self {
        ChukCrs::Epsg27700
    }
}

impl fmt::Display for ChukCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ChukCrs::Epsg27700 => "EPSG:27700",
            ChukCrs::Epsg4326 => "EPSG:4326",
        };
        write!(f, "{}", code)
    }
}
