//! Test data generators for creating synthetic CHUK-like data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

use chuk_common::{AttrValue, ChukCrs, Dataset, Grid, Variable, CRS_VARIABLE};

use crate::fixtures::{flag_meanings, flag_values, LAND_COVER_CLASSES};

/// Grid spacing of the 1km CHUK grid, in metres.
pub const CELL_SIZE_M: f64 = 1000.0;

fn yx() -> Vec<String> {
    vec!["y".to_string(), "x".to_string()]
}

/// Creates land cover codes cycling through a class table.
///
/// The cell at `(row, col)` holds the code of class
/// `(row * width + col) % classes.len()`, so every class appears and the
/// expected count of any class is easy to compute.
///
/// # Returns
///
/// A `Vec<i8>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::{create_land_cover_codes, SMALL_CLASSES};
///
/// let codes = create_land_cover_codes(3, 2, SMALL_CLASSES);
/// assert_eq!(codes, vec![0, 1, 2, 3, 4, 0]);
/// ```
pub fn create_land_cover_codes(width: usize, height: usize, classes: &[(&str, i8)]) -> Vec<i8> {
    (0..width * height)
        .map(|i| classes[i % classes.len()].1)
        .collect()
}

/// Number of cells of a given class in a grid from [`create_land_cover_codes`].
pub fn expected_class_count(width: usize, height: usize, classes: &[(&str, i8)], code: i8) -> usize {
    create_land_cover_codes(width, height, classes)
        .into_iter()
        .filter(|&c| c == code)
        .count()
}

/// Creates land cover values as floats with every `missing_every`-th cell set to NaN.
pub fn create_land_cover_with_missing(
    width: usize,
    height: usize,
    classes: &[(&str, i8)],
    missing_every: usize,
) -> Vec<f32> {
    create_land_cover_codes(width, height, classes)
        .into_iter()
        .enumerate()
        .map(|(i, code)| {
            if missing_every > 0 && i % missing_every == 0 {
                f32::NAN
            } else {
                f32::from(code)
            }
        })
        .collect()
}

/// Creates a dataset holding one `land_cover` flag variable of type byte.
pub fn create_land_cover_dataset(width: usize, height: usize, classes: &[(&str, i8)]) -> Dataset {
    let grid = Grid::new(
        vec![height, width],
        create_land_cover_codes(width, height, classes),
    )
    .expect("generated codes match shape");
    let variable = Variable::new("land_cover", yx(), grid)
        .expect("2D variable")
        .with_attr("long_name", "land cover class")
        .with_attr("flag_meanings", flag_meanings(classes))
        .with_attr("flag_values", AttrValue::Bytes(flag_values(classes)))
        .with_attr("grid_mapping", CRS_VARIABLE);

    let mut ds = Dataset::new();
    ds.add_variable(variable).expect("fresh dataset");
    ds
}

/// Creates a dataset using the full land cover class table.
pub fn create_full_land_cover_dataset(width: usize, height: usize) -> Dataset {
    create_land_cover_dataset(width, height, LAND_COVER_CLASSES)
}

/// Creates a miniature CHUK reference grid.
///
/// Contains `x`/`y` projected coordinates (1km cell centres, `y` north to
/// south), 2D `lat`/`lon`, `lat_bnds`/`lon_bnds` with four corners per
/// cell, and the `crsOSGB` grid mapping variable.
pub fn create_reference_grid(width: usize, height: usize) -> Dataset {
    let mut ds = Dataset::new();

    let x: Vec<f64> = (0..width).map(|i| (i as f64 + 0.5) * CELL_SIZE_M).collect();
    let y: Vec<f64> = (0..height)
        .map(|j| ((height - 1 - j) as f64 + 0.5) * CELL_SIZE_M)
        .collect();

    let x_var = Variable::new("x", vec!["x".to_string()], Grid::new(vec![width], x).expect("x"))
        .expect("x variable")
        .with_attr("standard_name", "projection_x_coordinate")
        .with_attr("units", "m");
    let y_var = Variable::new("y", vec!["y".to_string()], Grid::new(vec![height], y).expect("y"))
        .expect("y variable")
        .with_attr("standard_name", "projection_y_coordinate")
        .with_attr("units", "m");

    let (lats, lons) = create_latlon(width, height);
    let lat_var = Variable::new("lat", yx(), Grid::new(vec![height, width], lats.clone()).expect("lat"))
        .expect("lat variable")
        .with_attr("standard_name", "latitude")
        .with_attr("units", "degrees_north");
    let lon_var = Variable::new("lon", yx(), Grid::new(vec![height, width], lons.clone()).expect("lon"))
        .expect("lon variable")
        .with_attr("standard_name", "longitude")
        .with_attr("units", "degrees_east");

    let bnds_dims = vec!["y".to_string(), "x".to_string(), "nv".to_string()];
    let lat_bnds: Vec<f64> = lats
        .iter()
        .flat_map(|&lat| [lat - 0.0045, lat - 0.0045, lat + 0.0045, lat + 0.0045])
        .collect();
    let lon_bnds: Vec<f64> = lons
        .iter()
        .flat_map(|&lon| [lon - 0.0075, lon + 0.0075, lon + 0.0075, lon - 0.0075])
        .collect();
    let lat_bnds_var = Variable::new(
        "lat_bnds",
        bnds_dims.clone(),
        Grid::new(vec![height, width, 4], lat_bnds).expect("lat_bnds"),
    )
    .expect("lat_bnds variable");
    let lon_bnds_var = Variable::new(
        "lon_bnds",
        bnds_dims,
        Grid::new(vec![height, width, 4], lon_bnds).expect("lon_bnds"),
    )
    .expect("lon_bnds variable");

    let mut crs = Variable::new(CRS_VARIABLE, vec![], Grid::new(vec![], vec![0i32]).expect("scalar"))
        .expect("crs variable");
    crs.attrs = ChukCrs::Epsg27700.grid_mapping_attributes();

    for var in [x_var, y_var, lat_var, lon_var, lat_bnds_var, lon_bnds_var, crs] {
        ds.add_variable(var).expect("consistent reference grid");
    }
    ds
}

/// Creates synthetic 2D latitude/longitude arrays covering part of Great Britain.
///
/// Returns `(lats, lons)` in row-major order with row 0 the northernmost.
pub fn create_latlon(width: usize, height: usize) -> (Vec<f64>, Vec<f64>) {
    let mut lats = Vec::with_capacity(width * height);
    let mut lons = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            lats.push(49.9 + (height - 1 - row) as f64 * 0.009);
            lons.push(-7.5 + col as f64 * 0.015);
        }
    }
    (lats, lons)
}

/// Great-circle distances in metres from a point to each cell centre.
///
/// Uses the haversine formula with a 6371km Earth radius.
pub fn create_distances(lats: &[f64], lons: &[f64], from_lat: f64, from_lon: f64) -> Vec<f32> {
    const RADIUS_KM: f64 = 6371.0;

    lats.iter()
        .zip(lons)
        .map(|(&lat, &lon)| {
            let dlat = (lat - from_lat).to_radians();
            let dlon = (lon - from_lon).to_radians();
            let a = (dlat / 2.0).sin().powi(2)
                + lat.to_radians().cos() * from_lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
            let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
            (RADIUS_KM * c * 1000.0) as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SMALL_CLASSES;

    #[test]
    fn test_land_cover_codes_cycle() {
        let codes = create_land_cover_codes(4, 3, SMALL_CLASSES);
        assert_eq!(codes.len(), 12);
        assert_eq!(&codes[..6], &[0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_expected_class_count() {
        // 12 cells over 5 classes: codes 0 and 1 appear 3 times, others twice
        assert_eq!(expected_class_count(4, 3, SMALL_CLASSES, 0), 3);
        assert_eq!(expected_class_count(4, 3, SMALL_CLASSES, 1), 3);
        assert_eq!(expected_class_count(4, 3, SMALL_CLASSES, 4), 2);
    }

    #[test]
    fn test_missing_cells() {
        let values = create_land_cover_with_missing(5, 2, SMALL_CLASSES, 4);
        assert!(values[0].is_nan());
        assert!(values[4].is_nan());
        assert!(values[8].is_nan());
        assert_eq!(values.iter().filter(|v| v.is_nan()).count(), 3);
    }

    #[test]
    fn test_reference_grid_shapes() {
        let ds = create_reference_grid(6, 4);
        assert_eq!(ds.dimension("x"), Some(6));
        assert_eq!(ds.dimension("y"), Some(4));
        assert_eq!(ds.variable("lat_bnds").unwrap().shape(), &[4, 6, 4]);
        assert!(ds.contains_variable(CRS_VARIABLE));
    }

    #[test]
    fn test_distance_at_origin_is_zero() {
        let d = create_distances(&[54.0], &[-2.5], 54.0, -2.5);
        assert_eq!(d[0], 0.0);
        let d = create_distances(&[55.0], &[-2.5], 54.0, -2.5);
        // One degree of latitude is roughly 111km
        assert!((d[0] - 111_195.0).abs() < 100.0);
    }
}
