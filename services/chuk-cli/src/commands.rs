//! Subcommand implementations.
//!
//! Each command returns a serializable result; `main` prints it as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use chuk_common::ChukCrs;
use chuk_dataset::{geotiff_tags, write_geotiff, DatasetUtils, GeoTiffTags, NewDatasetAttributes};
use chuk_mask::{create_mask, Mask};
use chuk_metadata::ValidationReport;
use serde::Serialize;
use tracing::{debug, info};

/// Check a dataset against the reference grid and the metadata vocabulary.
pub fn check(utils: &DatasetUtils, input: &Path) -> Result<ValidationReport> {
    let (_, report) = utils
        .load(input, false, false)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    info!(
        path = %input.display(),
        warnings = report.warnings.len(),
        errors = report.errors.len(),
        "Checked dataset"
    );
    Ok(report)
}

/// Summary of an evaluated mask.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskSummary {
    pub variable: String,
    pub selected: Vec<String>,
    pub excluded: Vec<String>,
    pub count: usize,
    pub fraction: f64,
}

/// Evaluate `tokens AND NOT exclude` over a flag variable.
pub fn mask(
    input: &Path,
    variable: &str,
    tokens: &[String],
    exclude: &[String],
    include_missing: bool,
) -> Result<MaskSummary> {
    let selected = create_mask(input, variable, tokens, include_missing)
        .with_context(|| format!("Failed to build mask over {}", variable))?;
    let selected_names = selected.selected_categories()?;

    let (mask, excluded_names) = if exclude.is_empty() {
        (selected.into_mask_ref(), Vec::new())
    } else {
        let excluded = create_mask(input, variable, exclude, false)?;
        let names = excluded.selected_categories()?;
        let combined = selected.and_mask(vec![excluded.not_mask().into_mask_ref()]);
        (combined.into_mask_ref(), names)
    };

    let summary = MaskSummary {
        variable: variable.to_string(),
        selected: selected_names,
        excluded: excluded_names,
        count: mask.count()?,
        fraction: mask.fraction()?,
    };
    debug!(count = summary.count, fraction = summary.fraction, "Evaluated mask");
    Ok(summary)
}

/// Build GeoTIFF tags for one variable of a dataset.
pub fn tags(input: &Path, variable: &str) -> Result<GeoTiffTags> {
    let ds = netcdf_parser::read_dataset(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    Ok(geotiff_tags(&ds, variable)?)
}

/// Result of a GeoTIFF export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub variable: String,
    pub output: String,
    pub crs: ChukCrs,
}

/// Write one variable of a NetCDF dataset to a tagged GeoTIFF.
pub fn export(input: &Path, variable: &str, output: &Path) -> Result<ExportSummary> {
    let ds = netcdf_parser::read_dataset(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    write_geotiff(&ds, variable, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(ExportSummary {
        variable: variable.to_string(),
        output: output.display().to_string(),
        crs: ds.crs().unwrap_or_default(),
    })
}

/// Create an empty dataset on the reference grid and save it.
pub fn new_dataset(
    utils: &DatasetUtils,
    attrs: &NewDatasetAttributes,
    output: &Path,
    with_latlon: bool,
    with_latlon_bnds: bool,
) -> Result<ValidationReport> {
    let ds = utils.create_new_dataset(attrs)?;
    utils
        .save(&ds, output, with_latlon, with_latlon_bnds)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), tracking_id = %attrs.tracking_id, "Wrote new dataset");
    Ok(utils.check(&ds))
}
