//! CHUK dataset utilities.
//!
//! [`DatasetUtils`] binds a reference CHUK grid and checks, loads, builds
//! and saves datasets against it. [`write_geotiff`] exports one variable as
//! a tagged GeoTIFF and [`read_geotiff`] loads it back.

pub mod attributes;
pub mod error;
pub mod format;
pub mod geotiff;
pub mod tags;
pub mod utils;

pub use attributes::{format_timestamp, generate_tracking_id, NewDatasetAttributes};
pub use error::{DatasetError, Result};
pub use format::FileFormat;
pub use geotiff::{read_geotiff, write_geotiff};
pub use tags::{geotiff_tags, GeoTiffTags};
pub use utils::{DatasetUtils, MISSING_DIMENSION};
