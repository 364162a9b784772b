//! Write-then-read tests against real NetCDF-4 files in a temp directory.

use chuk_common::{AttrValue, VariableData, CRS_VARIABLE};
use netcdf_parser::{read_dataset, read_global_attributes, read_variable, write_dataset, NetCdfError};
use test_utils::{
    complete_global_attributes, create_land_cover_codes, create_land_cover_dataset,
    create_reference_grid, require_test_file, temp_test_dir, SMALL_CLASSES,
};

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_land_cover_survives_write_and_read() {
    let dir = temp_test_dir();
    let path = dir.path().join("lc.nc");
    let ds = create_land_cover_dataset(6, 3, SMALL_CLASSES);
    write_dataset(&ds, &path).unwrap();

    let var = read_variable(&path, "land_cover").unwrap();
    assert_eq!(var.dims, vec!["y", "x"]);
    assert_eq!(var.shape(), &[3, 6]);
    match &var.data {
        VariableData::Byte(grid) => {
            assert_eq!(grid.data(), create_land_cover_codes(6, 3, SMALL_CLASSES).as_slice())
        }
        other => panic!("expected byte data, got {}", other.type_name()),
    }
    assert_eq!(
        var.attrs.get_text("flag_meanings"),
        Some("No_data Deciduous_woodland Coniferous_woodland Urban Suburban")
    );
    assert_eq!(
        var.attrs.get("flag_values").and_then(AttrValue::to_i64_vec),
        Some(vec![0, 1, 2, 3, 4])
    );
}

#[test]
fn test_reference_grid_dimensions() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid.nc");
    write_dataset(&create_reference_grid(4, 3), &path).unwrap();

    let ds = read_dataset(&path).unwrap();
    assert_eq!(ds.dimension("x"), Some(4));
    assert_eq!(ds.dimension("y"), Some(3));
    assert!(ds.contains_variable("lat_bnds"));
    assert!(ds.contains_variable(CRS_VARIABLE));
    assert_eq!(ds.require_variable("lat_bnds").unwrap().shape(), &[3, 4, 4]);
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_global_attributes_keep_values() {
    let dir = temp_test_dir();
    let path = dir.path().join("attrs.nc");
    let mut ds = create_land_cover_dataset(2, 2, SMALL_CLASSES);
    ds.attrs = complete_global_attributes();
    write_dataset(&ds, &path).unwrap();

    let attrs = read_global_attributes(&path).unwrap();
    assert_eq!(attrs.len(), ds.attrs.len());
    assert_eq!(attrs.get_text("title"), ds.attrs.get_text("title"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_file() {
    let dir = temp_test_dir();
    let result = read_dataset(dir.path().join("nope.nc"));
    assert!(matches!(result, Err(NetCdfError::IoError(_))));
}

#[test]
fn test_missing_variable() {
    let dir = temp_test_dir();
    let path = dir.path().join("lc.nc");
    write_dataset(&create_land_cover_dataset(2, 2, SMALL_CLASSES), &path).unwrap();

    let result = read_variable(&path, "elevation");
    assert!(matches!(result, Err(NetCdfError::MissingData(_))));
}

// ============================================================================
// Real CHUK grid (optional)
// ============================================================================

#[test]
fn test_real_chuk_grid() {
    let path = require_test_file!("EOCIS-CHUK-GRID-1000M.nc");
    let ds = read_dataset(&path).unwrap();
    let nx = ds.dimension("x").unwrap();
    let ny = ds.dimension("y").unwrap();
    assert_eq!(ds.require_variable("lat").unwrap().shape(), &[ny, nx]);
    assert!(ds.contains_variable("crsOSGB"));
}
