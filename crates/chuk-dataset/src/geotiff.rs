//! Single-variable GeoTIFF export and import through GDAL.
//!
//! The band holds one `(y, x)` variable. Its attributes and the dataset's
//! global attributes travel as two JSON metadata items, `__variable__`
//! (`{<name>: {...}}`) and `__dataset__`, so a file written here can be read
//! back into a [`Dataset`].

use std::path::Path;

use chuk_common::{
    AttributeMap, ChukCrs, Dataset, Grid, Variable, VariableData, CRS_VARIABLE,
};
use chuk_metadata::{attributes_from_json, DATASET_KEY, VARIABLE_KEY};
use gdal::raster::{Buffer, GdalDataType, GdalType, RasterBand};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset as GdalDataset, DriverManager, Metadata};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{DatasetError, Result};
use crate::tags::geotiff_tags;

/// Cell size assumed when a dataset carries no usable coordinates.
const DEFAULT_CELL_SIZE: f64 = 1000.0;

/// Metadata domain used for the tags.
const TAG_DOMAIN: &str = "";

/// Write `variable` of `ds` to a single-band GeoTIFF.
///
/// The CRS comes from the dataset's grid mapping, defaulting to British
/// National Grid. The geotransform is derived from the `x`/`y` coordinate
/// variables. Byte data is stored as 16-bit integers and 64-bit integers as
/// doubles, since GeoTIFF has no portable form for either.
pub fn write_geotiff(ds: &Dataset, variable: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let tags = geotiff_tags(ds, variable)?;
    let var = ds.require_variable(variable)?;
    let (height, width) = match *var.shape() {
        [h, w] => (h, w),
        _ => {
            return Err(DatasetError::NotTwoDimensional {
                variable: variable.to_string(),
                shape: var.shape().to_vec(),
            })
        }
    };

    let mut out = match &var.data {
        VariableData::Byte(g) => create_band(path, &g.map(|&v| i16::from(v)))?,
        VariableData::Short(g) => create_band(path, g)?,
        VariableData::Int(g) => create_band(path, g)?,
        VariableData::Long(g) => create_band(path, &g.map(|&v| v as f64))?,
        VariableData::UByte(g) => create_band(path, g)?,
        VariableData::Float(g) => create_band(path, g)?,
        VariableData::Double(g) => create_band(path, g)?,
    };

    out.set_geo_transform(&geo_transform(ds, width, height))?;
    out.set_projection(&SpatialRef::from_epsg(tags.crs.epsg())?.to_wkt()?)?;
    out.set_metadata_item(VARIABLE_KEY, &tags.metadata[VARIABLE_KEY].to_string(), TAG_DOMAIN)?;
    out.set_metadata_item(DATASET_KEY, &tags.metadata[DATASET_KEY].to_string(), TAG_DOMAIN)?;

    if let Some(fill) = var.attrs.get("_FillValue").and_then(|v| v.to_f64()) {
        let mut band = out.rasterband(1)?;
        band.set_no_data_value(Some(fill))?;
    }

    info!(
        path = %path.display(),
        variable,
        crs = %tags.crs,
        width,
        height,
        "Wrote GeoTIFF"
    );
    Ok(())
}

/// Read a GeoTIFF written by [`write_geotiff`] back into a dataset holding
/// `x`, `y`, the grid mapping variable and the data variable.
pub fn read_geotiff(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let src = GdalDataset::open(path)?;

    let variables = parse_tag(&src, VARIABLE_KEY)?.ok_or_else(|| {
        DatasetError::InvalidTags(format!("{} has no {} tag", path.display(), VARIABLE_KEY))
    })?;
    let (name, var_attrs) = match &variables {
        Value::Object(map) => match map.iter().next() {
            Some((name, attrs)) => (name.clone(), attributes_from_json(attrs)),
            None => return Err(DatasetError::InvalidTags(format!("empty {} tag", VARIABLE_KEY))),
        },
        _ => return Err(DatasetError::InvalidTags(format!("{} is not an object", VARIABLE_KEY))),
    };
    let global = parse_tag(&src, DATASET_KEY)?
        .map(|v| attributes_from_json(&v))
        .unwrap_or_default();

    let band = src.rasterband(1)?;
    let (width, height) = (band.x_size(), band.y_size());
    let data = match band.band_type() {
        GdalDataType::UInt8 => VariableData::UByte(read_band(&band, width, height)?),
        GdalDataType::Int16 => VariableData::Short(read_band(&band, width, height)?),
        GdalDataType::Int32 => VariableData::Int(read_band(&band, width, height)?),
        GdalDataType::Float32 => VariableData::Float(read_band(&band, width, height)?),
        _ => VariableData::Double(read_band(&band, width, height)?),
    };

    let gt = src.geo_transform()?;
    let crs = src
        .spatial_ref()
        .ok()
        .and_then(|s| s.auth_code().ok())
        .and_then(|code| u32::try_from(code).ok())
        .and_then(ChukCrs::from_epsg)
        .unwrap_or_default();

    let mut ds = Dataset::with_attrs(global);
    ds.add_variable(coordinate("x", gt[0], gt[1], width, "projection_x_coordinate")?)?;
    ds.add_variable(coordinate("y", gt[3], gt[5], height, "projection_y_coordinate")?)?;
    let mut crs_var = Variable::new(CRS_VARIABLE, Vec::new(), Grid::new(Vec::new(), vec![0i32])?)?;
    crs_var.attrs = crs.grid_mapping_attributes();
    ds.add_variable(crs_var)?;

    let mut var = Variable::new(name, vec!["y".to_string(), "x".to_string()], data)?;
    var.attrs = var_attrs;
    ds.add_variable(var)?;

    debug!(path = %path.display(), %crs, width, height, "Read GeoTIFF");
    Ok(ds)
}

fn create_band<T: GdalType + Copy>(path: &Path, grid: &Grid<T>) -> Result<GdalDataset> {
    let (height, width) = (grid.shape()[0], grid.shape()[1]);
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let out = driver.create_with_band_type::<T, _>(path, width, height, 1)?;
    {
        let mut band = out.rasterband(1)?;
        let mut buffer = Buffer::new((width, height), grid.data().to_vec());
        band.write((0, 0), (width, height), &mut buffer)?;
    }
    Ok(out)
}

fn read_band<T: GdalType + Copy>(band: &RasterBand, width: usize, height: usize) -> Result<Grid<T>> {
    let buffer = band.read_as::<T>((0, 0), (width, height), (width, height), None)?;
    let data: Vec<T> = buffer.into_iter().collect();
    Ok(Grid::new(vec![height, width], data)?)
}

fn parse_tag(src: &GdalDataset, key: &str) -> Result<Option<Value>> {
    match src.metadata_item(key, TAG_DOMAIN) {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| DatasetError::InvalidTags(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}

/// `[x_origin, x_step, 0, y_origin, 0, y_step]` from cell-centre coordinates.
///
/// Without coordinates the grid is assumed to start at the BNG origin with
/// 1km cells and rows running north to south.
fn geo_transform(ds: &Dataset, width: usize, height: usize) -> [f64; 6] {
    let (x0, dx) = axis(ds, "x").unwrap_or((DEFAULT_CELL_SIZE / 2.0, DEFAULT_CELL_SIZE));
    let (y0, dy) = axis(ds, "y").unwrap_or((
        (height as f64 - 0.5) * DEFAULT_CELL_SIZE,
        -DEFAULT_CELL_SIZE,
    ));
    debug!(width, height, x0, dx, y0, dy, "Derived geotransform");
    [x0 - dx / 2.0, dx, 0.0, y0 - dy / 2.0, 0.0, dy]
}

/// First cell centre and step of a 1D coordinate variable.
fn axis(ds: &Dataset, name: &str) -> Option<(f64, f64)> {
    let values = ds.variable(name)?.data.to_f64();
    let data = values.data();
    match data {
        [first, second, ..] => Some((*first, second - first)),
        [only] if name == "y" => Some((*only, -DEFAULT_CELL_SIZE)),
        [only] => Some((*only, DEFAULT_CELL_SIZE)),
        [] => None,
    }
}

fn coordinate(name: &str, edge: f64, step: f64, n: usize, standard_name: &str) -> Result<Variable> {
    let centres: Vec<f64> = (0..n).map(|i| edge + (i as f64 + 0.5) * step).collect();
    let mut attrs = AttributeMap::new();
    attrs.insert("standard_name", standard_name);
    attrs.insert("units", "m");
    let mut var = Variable::new(name, vec![name.to_string()], Grid::new(vec![n], centres)?)?;
    var.attrs = attrs;
    Ok(var)
}
