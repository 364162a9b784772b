//! CLI configuration.
//!
//! Settings come from an optional YAML file, then environment variables,
//! then command line flags, each overriding the one before.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => bail!("Unknown log format '{}', expected json or pretty", other),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChukConfig {
    /// Reference CHUK grid file
    pub grid_path: Option<PathBuf>,

    pub logging: LoggingConfig,
}

impl ChukConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the optional YAML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `CHUK_GRID_PATH`, `CHUK_LOG_LEVEL` and `CHUK_LOG_FORMAT` as
    /// returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CHUK_GRID_PATH") {
            self.grid_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup("CHUK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CHUK_LOG_FORMAT") {
            self.logging.format = format.parse().context("Invalid CHUK_LOG_FORMAT")?;
        }
        Ok(())
    }

    /// The reference grid path, or an error naming how to supply one.
    pub fn require_grid_path(&self) -> Result<&Path> {
        match &self.grid_path {
            Some(path) => Ok(path),
            None => bail!("No CHUK grid configured; pass --grid or set CHUK_GRID_PATH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ChukConfig::default();
        assert!(config.grid_path.is_none());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config: ChukConfig = serde_yaml::from_str("logging:\n  format: json\n").unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHUK_GRID_PATH", "/data/grid.nc"),
            ("CHUK_LOG_LEVEL", "debug"),
            ("CHUK_LOG_FORMAT", "JSON"),
        ]
        .into();
        let mut config = ChukConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.require_grid_path().unwrap(), Path::new("/data/grid.nc"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_bad_log_format() {
        let mut config = ChukConfig::default();
        assert!(config
            .apply_overrides(|k| (k == "CHUK_LOG_FORMAT").then(|| "xml".to_string()))
            .is_err());
    }

    #[test]
    fn test_missing_grid_path() {
        assert!(ChukConfig::default().require_grid_path().is_err());
    }
}
