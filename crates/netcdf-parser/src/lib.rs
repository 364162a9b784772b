//! NetCDF-4 access for CHUK datasets.
//!
//! This crate is the raster accessor used by the mask engine and the
//! dataset utilities. It reads whole files or single variables into the
//! in-memory [`Dataset`](chuk_common::Dataset) model and writes datasets
//! back out.
//!
//! # Implementation Notes
//!
//! Reading and writing go through the `netcdf` crate, which wraps
//! libnetcdf/HDF5. Attribute values are mapped one-to-one onto
//! [`AttrValue`](chuk_common::AttrValue) so that fixed-width numeric types
//! survive a read/write cycle.
//!
//! No masking is applied on read: `_FillValue` is left in the data and
//! reported as an attribute. Consumers that want NaN for missing cells
//! (such as flag rasters) apply it themselves.

mod attrs;
pub mod error;
pub mod native;
mod reader;
mod writer;

pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
pub use reader::{read_dataset, read_global_attributes, read_variable};
pub use writer::write_dataset;
