//! GeoTIFF tag payloads.

use chuk_common::{ChukCrs, Dataset};
use chuk_metadata::to_json;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Everything needed to tag a single-variable GeoTIFF export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTiffTags {
    pub variable: String,
    pub crs: ChukCrs,
    pub metadata: Value,
}

/// Build the tag payload for `variable`.
///
/// A dataset with no grid mapping variable is tagged as British National
/// Grid.
pub fn geotiff_tags(dataset: &Dataset, variable: &str) -> Result<GeoTiffTags> {
    let var = dataset.require_variable(variable)?;
    Ok(GeoTiffTags {
        variable: variable.to_string(),
        crs: dataset.crs().unwrap_or_default(),
        metadata: to_json(&dataset.attrs, variable, &var.attrs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasetError;
    use chuk_common::{Grid, Variable};

    fn dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.attrs.insert("title", "Elevation");
        let var = Variable::new(
            "dem",
            vec!["y".into(), "x".into()],
            Grid::filled(vec![2, 2], 1.5f32),
        )
        .unwrap()
        .with_attr("units", "m");
        ds.add_variable(var).unwrap();
        ds
    }

    #[test]
    fn test_defaults_to_bng() {
        let tags = geotiff_tags(&dataset(), "dem").unwrap();
        assert_eq!(tags.crs, ChukCrs::Epsg27700);
        assert_eq!(tags.metadata["__variable__"]["dem"]["units"], "m");
        assert_eq!(tags.metadata["__dataset__"]["title"], "Elevation");
    }

    #[test]
    fn test_missing_variable() {
        assert!(matches!(
            geotiff_tags(&dataset(), "slope"),
            Err(DatasetError::Dataset(_))
        ));
    }
}
