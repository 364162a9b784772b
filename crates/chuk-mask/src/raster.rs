//! Flag rasters: integer-coded category grids with their name table.

use std::path::{Path, PathBuf};

use chuk_common::{AttrValue, Dataset, Grid, Variable};
use tracing::{debug, warn};

use crate::error::{MaskError, MaskResult};
use crate::resolver::CategoryResolver;

/// A categorical raster loaded from a variable with CF flag attributes.
///
/// Cell values are held as `f64` so that NaN can mark missing cells.
/// Category codes are compared exactly against the cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagRaster {
    name: String,
    values: Grid<f64>,
    categories: Vec<(String, i64)>,
}

impl FlagRaster {
    /// Create a raster from values and `(name, code)` pairs in declaration order.
    ///
    /// A name declared twice keeps its first position and takes the last code.
    pub fn new(name: impl Into<String>, values: Grid<f64>, categories: Vec<(String, i64)>) -> Self {
        let mut table: Vec<(String, i64)> = Vec::with_capacity(categories.len());
        for (meaning, code) in categories {
            match table.iter_mut().find(|(n, _)| *n == meaning) {
                Some(entry) => entry.1 = code,
                None => table.push((meaning, code)),
            }
        }
        Self {
            name: name.into(),
            values,
            categories: table,
        }
    }

    /// Create a raster from a space-separated `flag_meanings` string and
    /// parallel `flag_values`. Extra entries on either side are ignored.
    pub fn from_flags(
        name: impl Into<String>,
        values: Grid<f64>,
        flag_meanings: &str,
        flag_values: &[i64],
    ) -> Self {
        let name = name.into();
        let meanings: Vec<&str> = flag_meanings.split_whitespace().collect();
        if meanings.len() != flag_values.len() {
            warn!(
                variable = %name,
                meanings = meanings.len(),
                values = flag_values.len(),
                "flag_meanings and flag_values differ in length"
            );
        }
        let categories = meanings
            .into_iter()
            .zip(flag_values)
            .map(|(m, &v)| (m.to_string(), v))
            .collect();
        Self::new(name, values, categories)
    }

    /// Build a raster from a dataset variable.
    ///
    /// Requires text `flag_meanings` and integral `flag_values` attributes.
    /// Cells equal to `_FillValue` or `missing_value` become NaN.
    pub fn from_variable(variable: &Variable) -> MaskResult<Self> {
        let invalid = |message: &str| MaskError::InvalidFlags {
            variable: variable.name.clone(),
            message: message.to_string(),
        };

        let meanings = match variable.attrs.get("flag_meanings") {
            Some(AttrValue::Text(s)) => s.clone(),
            Some(AttrValue::TextList(v)) => v.join(" "),
            Some(_) => return Err(invalid("flag_meanings is not text")),
            None => return Err(invalid("missing flag_meanings attribute")),
        };
        let codes = variable
            .attrs
            .get("flag_values")
            .ok_or_else(|| invalid("missing flag_values attribute"))?
            .to_i64_vec()
            .ok_or_else(|| invalid("flag_values are not integers"))?;

        let fill_values: Vec<f64> = ["_FillValue", "missing_value"]
            .iter()
            .filter_map(|key| variable.attrs.get(key))
            .filter_map(AttrValue::to_f64)
            .collect();

        let mut values = variable.data.to_f64();
        if !fill_values.is_empty() {
            values = values.map(|&v| if fill_values.contains(&v) { f64::NAN } else { v });
        }

        debug!(
            variable = %variable.name,
            shape = ?values.shape(),
            categories = codes.len(),
            "Loaded flag raster"
        );
        Ok(Self::from_flags(variable.name.clone(), values, &meanings, &codes))
    }

    /// Variable name the raster was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell values; NaN marks missing cells.
    pub fn values(&self) -> &Grid<f64> {
        &self.values
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Category names in declaration order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(n, _)| n.as_str())
    }

    /// Integer code of a category.
    pub fn code_of(&self, name: &str) -> Option<i64> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| *code)
    }

    /// Resolver over this raster's category names.
    pub fn resolver(&self) -> CategoryResolver<'_> {
        CategoryResolver::new(&self.categories)
    }
}

/// Something that can hand out flag rasters by variable name.
pub trait RasterSource {
    fn flag_raster(&self, variable: &str) -> MaskResult<FlagRaster>;
}

/// Rasters read from a NetCDF file on disk.
#[derive(Debug, Clone)]
pub struct NetCdfSource {
    path: PathBuf,
}

impl NetCdfSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for NetCdfSource {
    fn flag_raster(&self, variable: &str) -> MaskResult<FlagRaster> {
        let var = netcdf_parser::read_variable(&self.path, variable)?;
        FlagRaster::from_variable(&var)
    }
}

impl RasterSource for Dataset {
    fn flag_raster(&self, variable: &str) -> MaskResult<FlagRaster> {
        FlagRaster::from_variable(self.require_variable(variable)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(data: Vec<f64>) -> Grid<f64> {
        let n = data.len();
        Grid::new(vec![1, n], data).unwrap()
    }

    #[test]
    fn test_from_flags_declaration_order() {
        let raster = FlagRaster::from_flags(
            "land_cover",
            values(vec![1.0, 2.0]),
            "Urban Arable Fen",
            &[20, 3, 8],
        );
        assert_eq!(
            raster.category_names().collect::<Vec<_>>(),
            vec!["Urban", "Arable", "Fen"]
        );
        assert_eq!(raster.code_of("Arable"), Some(3));
        assert_eq!(raster.code_of("Bog"), None);
    }

    #[test]
    fn test_from_flags_truncates_to_shorter() {
        let raster = FlagRaster::from_flags("v", values(vec![0.0]), "a b c", &[1, 2]);
        assert_eq!(raster.category_names().count(), 2);
    }

    #[test]
    fn test_duplicate_name_keeps_position_takes_last_code() {
        let raster = FlagRaster::from_flags("v", values(vec![0.0]), "a b a", &[1, 2, 3]);
        assert_eq!(raster.category_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(raster.code_of("a"), Some(3));
    }

    #[test]
    fn test_from_variable_applies_fill_value() {
        let grid = Grid::new(vec![1, 3], vec![1i8, -1, 2]).unwrap();
        let var = Variable::new("lc", vec!["y".into(), "x".into()], grid)
            .unwrap()
            .with_attr("flag_meanings", "a b")
            .with_attr("flag_values", AttrValue::Bytes(vec![1, 2]))
            .with_attr("_FillValue", AttrValue::Byte(-1));

        let raster = FlagRaster::from_variable(&var).unwrap();
        let data = raster.values().data();
        assert_eq!(data[0], 1.0);
        assert!(data[1].is_nan());
        assert_eq!(data[2], 2.0);
    }

    #[test]
    fn test_from_variable_requires_flags() {
        let grid = Grid::new(vec![1, 1], vec![1i8]).unwrap();
        let var = Variable::new("lc", vec!["y".into(), "x".into()], grid).unwrap();
        let result = FlagRaster::from_variable(&var);
        assert!(matches!(result, Err(MaskError::InvalidFlags { .. })));
    }

    #[test]
    fn test_dataset_source_missing_variable() {
        let ds = Dataset::new();
        let result = ds.flag_raster("land_cover");
        assert!(matches!(result, Err(MaskError::Dataset(_))));
    }
}
