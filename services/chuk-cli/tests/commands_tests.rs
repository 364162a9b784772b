//! Subcommand behaviour against synthetic files in a temp directory.

use chuk_cli::commands;
use chuk_dataset::{DatasetUtils, NewDatasetAttributes};
use test_utils::{
    create_land_cover_dataset, create_reference_grid, expected_class_count, temp_test_dir,
    SMALL_CLASSES,
};

#[test]
fn test_mask_with_exclude() {
    let dir = temp_test_dir();
    let path = dir.path().join("lc.nc");
    netcdf_parser::write_dataset(&create_land_cover_dataset(6, 5, SMALL_CLASSES), &path).unwrap();

    let tokens = vec!["*".to_string()];
    let exclude = vec!["No_data".to_string()];
    let summary = commands::mask(&path, "land_cover", &tokens, &exclude, false).unwrap();

    let total = 30;
    let no_data = expected_class_count(6, 5, SMALL_CLASSES, 0);
    assert_eq!(summary.count, total - no_data);
    assert_eq!(summary.excluded, vec!["No_data"]);
    assert_eq!(summary.selected.len(), SMALL_CLASSES.len());
    assert!((summary.fraction - (total - no_data) as f64 / total as f64).abs() < 1e-12);
}

#[test]
fn test_mask_unknown_category() {
    let dir = temp_test_dir();
    let path = dir.path().join("lc.nc");
    netcdf_parser::write_dataset(&create_land_cover_dataset(2, 2, SMALL_CLASSES), &path).unwrap();

    let err = commands::mask(&path, "land_cover", &["Bog".to_string()], &[], false).unwrap_err();
    assert!(format!("{:#}", err).contains("does not match any values"));
}

#[test]
fn test_new_then_check() {
    let dir = temp_test_dir();
    let grid = dir.path().join("grid.nc");
    netcdf_parser::write_dataset(&create_reference_grid(3, 2), &grid).unwrap();
    let utils = DatasetUtils::open(&grid).unwrap();

    let out = dir.path().join("new.nc");
    let attrs = NewDatasetAttributes::new("Test", "EOCIS CHUK", "0.1");
    let created = commands::new_dataset(&utils, &attrs, &out, false, false).unwrap();
    assert!(created.errors.is_empty());

    let report = commands::check(&utils, &out).unwrap();
    assert!(report.errors.is_empty());
    assert!(report
        .warnings
        .iter()
        .all(|w| w.detail.to_string() != "title"));
}

#[test]
fn test_tags_for_land_cover() {
    let dir = temp_test_dir();
    let path = dir.path().join("lc.nc");
    netcdf_parser::write_dataset(&create_land_cover_dataset(2, 2, SMALL_CLASSES), &path).unwrap();

    let tags = commands::tags(&path, "land_cover").unwrap();
    assert_eq!(tags.variable, "land_cover");
    assert!(tags.metadata["__variable__"]["land_cover"]["flag_meanings"].is_string());
}

#[test]
fn test_export_then_reload() {
    let dir = temp_test_dir();
    let path = dir.path().join("lc.nc");
    netcdf_parser::write_dataset(&create_land_cover_dataset(4, 3, SMALL_CLASSES), &path).unwrap();
    let out = dir.path().join("lc.tif");

    let summary = commands::export(&path, "land_cover", &out).unwrap();
    assert_eq!(summary.variable, "land_cover");
    assert_eq!(summary.crs, chuk_common::ChukCrs::Epsg27700);

    let loaded = chuk_dataset::read_geotiff(&out).unwrap();
    assert_eq!(loaded.require_variable("land_cover").unwrap().shape(), &[3, 4]);
    assert_eq!(loaded.crs(), Some(chuk_common::ChukCrs::Epsg27700));
}
