//! File format detection from path suffixes.

use std::fmt;
use std::path::Path;

use crate::error::{DatasetError, Result};

const NETCDF_SUFFIXES: &[&str] = &[".nc"];
pub(crate) const GEOTIFF_SUFFIXES: &[&str] = &[".tif", ".tiff", ".geotif", ".geotiff"];

/// On-disk formats a CHUK dataset may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    NetCdf,
    GeoTiff,
}

impl FileFormat {
    /// Every suffix accepted by [`FileFormat::from_path`].
    pub fn supported_suffixes() -> Vec<&'static str> {
        NETCDF_SUFFIXES
            .iter()
            .chain(GEOTIFF_SUFFIXES)
            .copied()
            .collect()
    }

    /// Detect the format from the file suffix, ignoring case.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let suffix = path
            .as_ref()
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        if NETCDF_SUFFIXES.contains(&suffix.as_str()) {
            Ok(FileFormat::NetCdf)
        } else if GEOTIFF_SUFFIXES.contains(&suffix.as_str()) {
            Ok(FileFormat::GeoTiff)
        } else {
            Err(DatasetError::UnsupportedFormat {
                suffix,
                supported: Self::supported_suffixes(),
            })
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::NetCdf => "NetCDF",
            FileFormat::GeoTiff => "GeoTIFF",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_formats() {
        assert_eq!(FileFormat::from_path("a/b.nc").unwrap(), FileFormat::NetCdf);
        assert_eq!(FileFormat::from_path("b.NC").unwrap(), FileFormat::NetCdf);
        assert_eq!(FileFormat::from_path("b.tif").unwrap(), FileFormat::GeoTiff);
        assert_eq!(FileFormat::from_path("b.GeoTIFF").unwrap(), FileFormat::GeoTiff);
    }

    #[test]
    fn test_rejects_other_suffixes() {
        match FileFormat::from_path("data.zarr") {
            Err(DatasetError::UnsupportedFormat { suffix, supported }) => {
                assert_eq!(suffix, ".zarr");
                assert_eq!(supported.len(), 5);
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
        assert!(FileFormat::from_path("no_suffix").is_err());
    }
}
