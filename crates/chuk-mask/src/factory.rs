//! Entry points that build leaf masks from on-disk rasters.

use std::path::Path;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::error::MaskResult;
use crate::leaf::LeafMask;
use crate::raster::{NetCdfSource, RasterSource};

/// Category names or glob patterns selecting the cells of a mask.
///
/// Converts from a single token as well as from arrays, slices and
/// vectors of tokens, so `"Urban"` and `["Urban", "Suburban"]` both work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Tokens {
    fn from(token: &str) -> Self {
        Tokens(vec![token.to_string()])
    }
}

impl From<String> for Tokens {
    fn from(token: String) -> Self {
        Tokens(vec![token])
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Tokens {
    fn from(tokens: [S; N]) -> Self {
        tokens.iter().collect()
    }
}

impl<S: AsRef<str>> From<&[S]> for Tokens {
    fn from(tokens: &[S]) -> Self {
        tokens.iter().collect()
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Tokens {
    fn from(tokens: Vec<S>) -> Self {
        tokens.iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tokens {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Tokens(iter.into_iter().map(|t| t.as_ref().to_string()).collect())
    }
}

/// Build a mask over `variable` in the NetCDF file at `path`, selecting
/// every category named or matched by `tokens`.
///
/// ```no_run
/// use chuk_mask::{create_mask, Mask};
///
/// let urban = create_mask("land_cover.nc", "land_cover", "Urban", false)?;
/// let woodland = create_mask("land_cover.nc", "land_cover", ["*woodland"], false)?;
/// println!("{} {:.3}", urban.count()?, woodland.fraction()?);
/// # Ok::<(), chuk_mask::MaskError>(())
/// ```
pub fn create_mask(
    path: impl AsRef<Path>,
    variable: &str,
    tokens: impl Into<Tokens>,
    include_missing: bool,
) -> MaskResult<Rc<LeafMask>> {
    create_mask_from(&NetCdfSource::new(path), variable, tokens, include_missing)
}

/// Build a mask from any raster source.
#[instrument(skip(source, tokens))]
pub fn create_mask_from<R>(
    source: &R,
    variable: &str,
    tokens: impl Into<Tokens>,
    include_missing: bool,
) -> MaskResult<Rc<LeafMask>>
where
    R: RasterSource + ?Sized,
{
    let tokens = tokens.into();
    let raster = source.flag_raster(variable)?;
    let mask = LeafMask::new(raster, include_missing);
    for token in tokens.as_slice() {
        mask.add_category(token)?;
    }
    debug!(selected = ?mask.selection(), "Created mask");
    Ok(Rc::new(mask))
}
