//! Common types and utilities shared across all CHUK crates.

pub mod attrs;
pub mod crs;
pub mod dataset;
pub mod error;
pub mod grid;

pub use attrs::{AttrValue, AttributeMap};
pub use crs::{ChukCrs, CRS_VARIABLE};
pub use dataset::{Dataset, Variable, VariableData};
pub use error::{ChukError, ChukResult};
pub use grid::{BoolGrid, Grid};
