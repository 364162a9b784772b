//! Dataset operations relative to a reference CHUK grid.

use std::path::Path;

use chrono::Utc;
use chuk_common::{AttributeMap, ChukError, Dataset, Variable, VariableData, CRS_VARIABLE};
use chuk_metadata::{
    check_shapes, require_attributes, Detail, Diagnostic, MetadataValidator, ShapeMap, ValidationReport,
    NEW_DATASET_REQUIRED,
};
use tracing::{debug, info, warn};

use crate::attributes::NewDatasetAttributes;
use crate::error::{DatasetError, Result};
use crate::format::{FileFormat, GEOTIFF_SUFFIXES};
use crate::geotiff::{read_geotiff, write_geotiff};

const LATLON: [&str; 2] = ["lat", "lon"];
const LATLON_BNDS: [&str; 2] = ["lat_bnds", "lon_bnds"];
const SPATIAL: [&str; 2] = ["x", "y"];

/// Error code for a spatial dimension absent from a checked dataset.
pub const MISSING_DIMENSION: &str = "missing_dimension";

/// Utilities bound to a loaded reference grid.
#[derive(Debug, Clone)]
pub struct DatasetUtils {
    grid: Dataset,
    validator: MetadataValidator,
}

impl DatasetUtils {
    /// Load the reference grid from a NetCDF file.
    pub fn open(grid_path: impl AsRef<Path>) -> Result<Self> {
        let grid_path = grid_path.as_ref();
        let grid = netcdf_parser::read_dataset(grid_path)?;
        info!(
            path = %grid_path.display(),
            x = ?grid.dimension("x"),
            y = ?grid.dimension("y"),
            "Loaded CHUK reference grid"
        );
        Ok(Self::from_grid(grid))
    }

    /// Use an already loaded reference grid.
    pub fn from_grid(grid: Dataset) -> Self {
        Self {
            grid,
            validator: MetadataValidator::default(),
        }
    }

    pub fn grid(&self) -> &Dataset {
        &self.grid
    }

    /// Check that `path` names a supported format.
    pub fn check_path(path: impl AsRef<Path>) -> Result<FileFormat> {
        FileFormat::from_path(path)
    }

    /// Load a NetCDF dataset, or a GeoTIFF written by [`write_geotiff`],
    /// check it and optionally attach coordinates from the reference grid.
    pub fn load(
        &self,
        path: impl AsRef<Path>,
        add_latlon: bool,
        add_latlon_bnds: bool,
    ) -> Result<(Dataset, ValidationReport)> {
        let path = path.as_ref();
        let mut ds = match Self::check_path(path)? {
            FileFormat::NetCdf => netcdf_parser::read_dataset(path)?,
            FileFormat::GeoTiff => read_geotiff(path)?,
        };
        debug!(path = %path.display(), add_latlon, add_latlon_bnds, "Loading CHUK dataset");
        let report = self.check(&ds);
        if add_latlon {
            self.add_latlon(&mut ds)?;
        }
        if add_latlon_bnds {
            self.add_latlon_bnds(&mut ds)?;
        }
        Ok((ds, report))
    }

    /// Compare `x`/`y` with the reference grid and check global attributes.
    ///
    /// Shape findings are errors, attribute findings are warnings. Nothing
    /// here fails; callers decide what to do with the report.
    pub fn check(&self, ds: &Dataset) -> ValidationReport {
        let mut report = self.validator.check(&ds.attrs);

        let mut actual = ShapeMap::new();
        let mut expected = ShapeMap::new();
        for name in SPATIAL {
            if let Some(shape) = spatial_shape(&self.grid, name) {
                expected.insert(name.to_string(), shape);
            }
            match spatial_shape(ds, name) {
                Some(shape) => {
                    actual.insert(name.to_string(), shape);
                }
                None => report.errors.push(Diagnostic {
                    code: MISSING_DIMENSION.to_string(),
                    detail: Detail::Key(name.to_string()),
                }),
            }
        }
        report.errors.extend(check_shapes(&actual, &expected));

        if !report.is_clean() {
            debug!(
                warnings = report.warnings.len(),
                errors = report.errors.len(),
                "Dataset check found problems"
            );
        }
        report
    }

    /// Copy `lat`/`lon` from the reference grid.
    pub fn add_latlon(&self, ds: &mut Dataset) -> Result<()> {
        self.copy_from_grid(ds, &LATLON)
    }

    /// Copy `lat_bnds`/`lon_bnds` from the reference grid.
    pub fn add_latlon_bnds(&self, ds: &mut Dataset) -> Result<()> {
        self.copy_from_grid(ds, &LATLON_BNDS)
    }

    /// Remove or attach lat/lon variables so that exactly the requested
    /// ones are present.
    pub fn adjust_latlon(&self, ds: &mut Dataset, with_latlon: bool, with_latlon_bnds: bool) -> Result<()> {
        for (wanted, names) in [(with_latlon, LATLON), (with_latlon_bnds, LATLON_BNDS)] {
            if !wanted {
                for name in names {
                    ds.remove_variable(name);
                }
            } else if names.iter().any(|n| !ds.contains_variable(n)) {
                self.copy_from_grid(ds, &names)?;
            }
        }
        Ok(())
    }

    /// Create an empty dataset on the reference grid.
    ///
    /// The required attributes are validated before anything is built.
    pub fn create_new_dataset(&self, attrs: &NewDatasetAttributes) -> Result<Dataset> {
        let attributes = attrs.to_attribute_map(Utc::now());
        require_attributes(&attributes, NEW_DATASET_REQUIRED)?;

        let mut ds = Dataset::with_attrs(attributes);
        self.copy_from_grid(&mut ds, &["x", "y", CRS_VARIABLE])?;
        info!(
            title = %attrs.title,
            tracking_id = %attrs.tracking_id,
            "Created new CHUK dataset"
        );
        Ok(ds)
    }

    /// Add a `(y, x)` variable, tagging it with the grid mapping.
    pub fn add_variable(
        ds: &mut Dataset,
        name: &str,
        data: impl Into<VariableData>,
        attrs: AttributeMap,
    ) -> Result<()> {
        let data = data.into();
        let expected: Vec<usize> = ["y", "x"]
            .iter()
            .map(|d| {
                ds.dimension(d)
                    .ok_or_else(|| ChukError::MissingDimension(d.to_string()))
            })
            .collect::<std::result::Result<_, _>>()?;
        if data.shape() != expected.as_slice() {
            return Err(ChukError::ShapeMismatch {
                expected,
                actual: data.shape().to_vec(),
            }
            .into());
        }

        let mut variable = Variable::new(name, vec!["y".to_string(), "x".to_string()], data)?;
        variable.attrs = attrs;
        if ds.contains_variable(CRS_VARIABLE) {
            variable.attrs.insert_if_absent("grid_mapping", CRS_VARIABLE);
        }
        ds.add_variable(variable)?;
        Ok(())
    }

    /// Write a dataset as NetCDF-4 with the requested lat/lon variables.
    ///
    /// A `.tif` path exports the dataset's only `(y, x)` data variable as a
    /// GeoTIFF; lat/lon flags do not apply there. The caller's dataset is
    /// left unchanged.
    pub fn save(
        &self,
        ds: &Dataset,
        path: impl AsRef<Path>,
        with_latlon: bool,
        with_latlon_bnds: bool,
    ) -> Result<()> {
        let path = path.as_ref();
        if Self::check_path(path)? == FileFormat::GeoTiff {
            let candidates = raster_variables(ds);
            return match candidates.as_slice() {
                [only] => self.save_as_geotiff(ds, only, path),
                _ => Err(DatasetError::AmbiguousVariable {
                    candidates: candidates.iter().map(|s| s.to_string()).collect(),
                }),
            };
        }

        self.report_before_save(ds);
        let mut out = ds.clone();
        self.adjust_latlon(&mut out, with_latlon, with_latlon_bnds)?;
        netcdf_parser::write_dataset(&out, path)?;
        Ok(())
    }

    /// Export one variable as a single-band GeoTIFF tagged with its own and
    /// the dataset's attributes.
    pub fn save_as_geotiff(&self, ds: &Dataset, variable: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if Self::check_path(path)? != FileFormat::GeoTiff {
            return Err(DatasetError::UnsupportedFormat {
                suffix: path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default(),
                supported: GEOTIFF_SUFFIXES.to_vec(),
            });
        }
        self.report_before_save(ds);
        write_geotiff(ds, variable, path)
    }

    fn report_before_save(&self, ds: &Dataset) {
        let report = self.check(ds);
        for warning in &report.warnings {
            debug!(%warning, "Saving with metadata warning");
        }
        for error in &report.errors {
            warn!(%error, "Saving dataset that does not match the reference grid");
        }
    }

    fn copy_from_grid(&self, ds: &mut Dataset, names: &[&str]) -> Result<()> {
        for name in names {
            let var = self.grid.require_variable(name)?.clone();
            ds.add_variable(var)?;
        }
        Ok(())
    }
}

/// Data variables laid out on `(y, x)`, excluding the lat/lon coordinates.
fn raster_variables(ds: &Dataset) -> Vec<&str> {
    ds.variables()
        .iter()
        .filter(|v| v.dims == ["y", "x"] && !LATLON.contains(&v.name.as_str()))
        .map(|v| v.name.as_str())
        .collect()
}

/// Shape of a spatial coordinate: the variable's if present, otherwise the
/// bare dimension length.
fn spatial_shape(ds: &Dataset, name: &str) -> Option<Vec<usize>> {
    ds.variable(name)
        .map(|v| v.shape().to_vec())
        .or_else(|| ds.dimension(name).map(|len| vec![len]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chuk_common::Grid;
    use chuk_metadata::BAD_SHAPE;
    use test_utils::create_reference_grid;

    fn utils() -> DatasetUtils {
        DatasetUtils::from_grid(create_reference_grid(4, 3))
    }

    fn attrs() -> NewDatasetAttributes {
        NewDatasetAttributes::new("Distances", "EOCIS CHUK", "1.0")
    }

    #[test]
    fn test_create_new_dataset_copies_grid() {
        let ds = utils().create_new_dataset(&attrs()).unwrap();
        assert!(ds.contains_variable("x"));
        assert!(ds.contains_variable("y"));
        assert!(ds.contains_variable(CRS_VARIABLE));
        assert!(!ds.contains_variable("lat"));
        assert_eq!(ds.attrs.get_text("Conventions"), Some("CF-1.10"));
        assert!(ds.attrs.contains_key("date_created"));
    }

    #[test]
    fn test_create_new_dataset_requires_attributes() {
        for field in ["title", "institution", "product_version", "tracking_id"] {
            let mut a = attrs();
            match field {
                "title" => a.title.clear(),
                "institution" => a.institution.clear(),
                "product_version" => a.product_version.clear(),
                _ => a.tracking_id.clear(),
            }
            match utils().create_new_dataset(&a) {
                Err(DatasetError::Metadata(e)) => assert!(e.to_string().contains(field)),
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_add_variable_shape() {
        let utils = utils();
        let mut ds = utils.create_new_dataset(&attrs()).unwrap();

        DatasetUtils::add_variable(&mut ds, "d", Grid::filled(vec![3, 4], 0.0f32), AttributeMap::new())
            .unwrap();
        assert_eq!(
            ds.variable("d").unwrap().attrs.get_text("grid_mapping"),
            Some(CRS_VARIABLE)
        );

        let result =
            DatasetUtils::add_variable(&mut ds, "e", Grid::filled(vec![4, 3], 0.0f32), AttributeMap::new());
        assert!(matches!(
            result,
            Err(DatasetError::Dataset(ChukError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_check_reports_shape_errors() {
        let utils = utils();
        let other = DatasetUtils::from_grid(create_reference_grid(4, 2));
        let ds = other.create_new_dataset(&attrs()).unwrap();

        let report = utils.check(&ds);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, BAD_SHAPE);
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_check_missing_dimension() {
        let report = utils().check(&Dataset::new());
        let codes: Vec<_> = report.errors.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec![MISSING_DIMENSION, MISSING_DIMENSION]);
    }

    #[test]
    fn test_adjust_latlon() {
        let utils = utils();
        let mut ds = utils.create_new_dataset(&attrs()).unwrap();

        utils.adjust_latlon(&mut ds, true, true).unwrap();
        for name in ["lat", "lon", "lat_bnds", "lon_bnds"] {
            assert!(ds.contains_variable(name), "{}", name);
        }

        utils.adjust_latlon(&mut ds, true, false).unwrap();
        assert!(ds.contains_variable("lat"));
        assert!(!ds.contains_variable("lat_bnds"));

        utils.adjust_latlon(&mut ds, false, false).unwrap();
        assert!(!ds.contains_variable("lon"));
    }

    #[test]
    fn test_save_geotiff_needs_single_raster_variable() {
        let utils = utils();
        let ds = utils.create_new_dataset(&attrs()).unwrap();
        match utils.save(&ds, "out.tif", false, false) {
            Err(DatasetError::AmbiguousVariable { candidates }) => assert!(candidates.is_empty()),
            other => panic!("expected AmbiguousVariable, got {:?}", other),
        }
        assert!(matches!(
            utils.save(&ds, "out.csv", false, false),
            Err(DatasetError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_raster_variables_skip_coordinates() {
        let mut ds = create_reference_grid(4, 3);
        assert!(raster_variables(&ds).is_empty());
        let data = Variable::new("t", vec!["y".to_string(), "x".to_string()], Grid::filled(vec![3, 4], 1.0f32)).unwrap();
        ds.add_variable(data).unwrap();
        assert_eq!(raster_variables(&ds), vec!["t"]);
    }

    #[test]
    fn test_save_as_geotiff_rejects_netcdf_path() {
        let utils = utils();
        let ds = utils.create_new_dataset(&attrs()).unwrap();
        assert!(matches!(
            utils.save_as_geotiff(&ds, "lat", "out.nc"),
            Err(DatasetError::UnsupportedFormat { .. })
        ));
    }
}
