//! Validation of realistic CHUK attribute sets.

use chuk_common::AttrValue;
use chuk_metadata::{
    check, check_shapes, require_attributes, to_json, Detail, MetadataError, MetadataValidator,
    ShapeMap, EXPECTED_GLOBAL_ATTRIBUTES, MISSING_GLOBAL_ATTRIBUTE, NEW_DATASET_REQUIRED,
};
use test_utils::{complete_global_attributes, create_land_cover_dataset, SMALL_CLASSES};

#[test]
fn test_complete_attributes_are_clean() {
    let report = MetadataValidator::default().check(&complete_global_attributes());
    assert!(report.is_clean(), "unexpected findings: {:?}", report);
}

#[test]
fn test_each_missing_key_reported_once() {
    let mut attrs = complete_global_attributes();
    attrs.remove("license");
    attrs.remove("sensor");

    let report = MetadataValidator::default().check(&attrs);
    let keys: Vec<String> = report
        .warnings
        .iter()
        .map(|d| {
            assert_eq!(d.code, MISSING_GLOBAL_ATTRIBUTE);
            d.detail.to_string()
        })
        .collect();
    assert_eq!(keys, vec!["license", "sensor"]);
    assert!(!report.has_errors());
}

#[test]
fn test_spec_example_title_institution() {
    let report = check(&Default::default(), ["title", "institution"]);
    let mut keys: Vec<_> = report.warnings.iter().map(|d| d.detail.clone()).collect();
    keys.sort_by_key(|d| d.to_string());
    assert_eq!(
        keys,
        vec![Detail::Key("institution".into()), Detail::Key("title".into())]
    );
    assert!(report.errors.is_empty());
}

#[test]
fn test_fixture_covers_vocabulary() {
    let attrs = complete_global_attributes();
    for key in EXPECTED_GLOBAL_ATTRIBUTES {
        assert!(attrs.contains_key(key), "fixture lacks {}", key);
    }
    assert!(require_attributes(&attrs, NEW_DATASET_REQUIRED).is_ok());
}

#[test]
fn test_required_attribute_empty() {
    let mut attrs = complete_global_attributes();
    attrs.insert("tracking_id", "");
    assert_eq!(
        require_attributes(&attrs, NEW_DATASET_REQUIRED),
        Err(MetadataError::RequiredAttributeMissing("tracking_id".into()))
    );
}

#[test]
fn test_shape_check_against_reference() {
    let actual: ShapeMap = [("x".to_string(), vec![5]), ("y".to_string(), vec![2])].into();
    let expected: ShapeMap = [("x".to_string(), vec![5]), ("y".to_string(), vec![3])].into();
    let errors = check_shapes(&actual, &expected);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "bad_shape: y has shape [2], expected [3]");
}

#[test]
fn test_land_cover_tags() {
    let mut ds = create_land_cover_dataset(3, 2, SMALL_CLASSES);
    ds.attrs = complete_global_attributes();
    let var = ds.require_variable("land_cover").unwrap();

    let tags = to_json(&ds.attrs, "land_cover", &var.attrs);
    assert_eq!(tags["__dataset__"]["title"], "Distance to the GB Centroid");
    assert_eq!(
        tags["__variable__"]["land_cover"]["flag_values"],
        serde_json::json!([0, 1, 2, 3, 4])
    );
    assert!(matches!(var.attrs.get("flag_values"), Some(AttrValue::Bytes(_))));
}
