//! Categorical masks over CHUK flag rasters.
//!
//! A [`LeafMask`] selects categories of one raster by name or shell glob.
//! Masks compose with AND, OR and NOT into [`CombinedMask`] trees that are
//! evaluated on demand:
//!
//! ```no_run
//! use chuk_mask::{create_mask, Mask};
//!
//! let woodland = create_mask("lc.nc", "land_cover", ["*woodland"], false)?;
//! let urban = create_mask("lc.nc", "land_cover", ["Urban", "Suburban"], false)?;
//! let neither = woodland.or_mask(vec![urban.into_mask_ref()]).not_mask();
//! println!("{} cells", neither.count()?);
//! # Ok::<(), chuk_mask::MaskError>(())
//! ```

pub mod combined;
pub mod error;
pub mod factory;
pub mod leaf;
pub mod mask;
pub mod raster;
pub mod resolver;

pub use combined::{CombinedMask, Operator};
pub use error::{MaskError, MaskResult};
pub use factory::{create_mask, create_mask_from, Tokens};
pub use leaf::LeafMask;
pub use mask::{combine_and, combine_or, negate, Mask, MaskRef};
pub use raster::{FlagRaster, NetCdfSource, RasterSource};
pub use resolver::CategoryResolver;
