//! GeoTIFF export and reload through GDAL, in temp dirs.

use chuk_common::{AttributeMap, ChukCrs, Dataset, Grid, VariableData};
use chuk_dataset::{read_geotiff, write_geotiff, DatasetError, DatasetUtils, NewDatasetAttributes};
use test_utils::{
    create_distances, create_land_cover_dataset, create_latlon, create_reference_grid, temp_test_dir,
    GB_CENTROID, SMALL_CLASSES,
};

const WIDTH: usize = 5;
const HEIGHT: usize = 4;

fn distances_dataset(utils: &DatasetUtils) -> Dataset {
    let (lats, lons) = create_latlon(WIDTH, HEIGHT);
    let d = create_distances(&lats, &lons, GB_CENTROID.0, GB_CENTROID.1);
    let mut ds = utils
        .create_new_dataset(&NewDatasetAttributes::new("Distances", "EOCIS CHUK", "1.0"))
        .unwrap();
    let mut attrs = AttributeMap::new();
    attrs.insert("units", "m");
    attrs.insert("long_name", "distance to the GB centroid");
    DatasetUtils::add_variable(&mut ds, "distances", Grid::new(vec![HEIGHT, WIDTH], d).unwrap(), attrs)
        .unwrap();
    ds
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_save_and_load_geotiff() {
    let dir = temp_test_dir();
    let utils = DatasetUtils::from_grid(create_reference_grid(WIDTH, HEIGHT));
    let ds = distances_dataset(&utils);
    let path = dir.path().join("distances.tif");

    utils.save(&ds, &path, true, true).unwrap();
    let (loaded, report) = utils.load(&path, false, false).unwrap();

    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(loaded.crs(), Some(ChukCrs::Epsg27700));
    assert_eq!(loaded.attrs.get_text("title"), Some("Distances"));
    assert_eq!(
        loaded.attrs.get_text("tracking_id"),
        ds.attrs.get_text("tracking_id")
    );

    let original = ds.require_variable("distances").unwrap();
    let restored = loaded.require_variable("distances").unwrap();
    assert_eq!(restored.dims, vec!["y", "x"]);
    assert_eq!(restored.attrs.get_text("units"), Some("m"));
    assert_eq!(restored.data, original.data);

    for axis in ["x", "y"] {
        assert_eq!(
            loaded.require_variable(axis).unwrap().data.to_f64(),
            ds.require_variable(axis).unwrap().data.to_f64(),
            "{}",
            axis
        );
    }
}

#[test]
fn test_flag_raster_keeps_flag_metadata() {
    let dir = temp_test_dir();
    let ds = create_land_cover_dataset(WIDTH, HEIGHT, SMALL_CLASSES);
    let path = dir.path().join("land_cover.tif");

    write_geotiff(&ds, "land_cover", &path).unwrap();
    let loaded = read_geotiff(&path).unwrap();

    let restored = loaded.require_variable("land_cover").unwrap();
    let original = ds.require_variable("land_cover").unwrap();
    assert!(matches!(restored.data, VariableData::Short(_)));
    assert_eq!(restored.data.to_f64(), original.data.to_f64());
    assert_eq!(
        restored.attrs.get_text("flag_meanings"),
        original.attrs.get_text("flag_meanings")
    );
    assert_eq!(
        restored.attrs.get("flag_values").and_then(|v| v.to_i64_vec()),
        original.attrs.get("flag_values").and_then(|v| v.to_i64_vec())
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_save_geotiff_with_two_variables() {
    let dir = temp_test_dir();
    let utils = DatasetUtils::from_grid(create_reference_grid(WIDTH, HEIGHT));
    let mut ds = distances_dataset(&utils);
    DatasetUtils::add_variable(
        &mut ds,
        "twice",
        Grid::filled(vec![HEIGHT, WIDTH], 2.0f64),
        AttributeMap::new(),
    )
    .unwrap();

    match utils.save(&ds, dir.path().join("both.tif"), false, false) {
        Err(DatasetError::AmbiguousVariable { candidates }) => {
            assert_eq!(candidates, vec!["distances", "twice"])
        }
        other => panic!("expected AmbiguousVariable, got {:?}", other),
    }
}

#[test]
fn test_read_untagged_geotiff() {
    let dir = temp_test_dir();
    let path = dir.path().join("plain.tif");
    let driver = gdal::DriverManager::get_driver_by_name("GTiff").unwrap();
    driver.create_with_band_type::<u8, _>(&path, 2, 2, 1).unwrap();

    assert!(matches!(read_geotiff(&path), Err(DatasetError::InvalidTags(_))));
}

#[test]
fn test_write_unknown_variable() {
    let dir = temp_test_dir();
    let ds = create_reference_grid(WIDTH, HEIGHT);
    assert!(matches!(
        write_geotiff(&ds, "missing", dir.path().join("m.tif")),
        Err(DatasetError::Dataset(_))
    ));
}
