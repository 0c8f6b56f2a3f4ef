//! # Configuration Module
//!
//! Where the calibration file and the phone profile directory live.
//! An optional `calibrator.json` in the working directory overrides the
//! defaults; any field left out keeps its default.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the optional configuration file.
pub const CONFIG_FILE: &str = "calibrator.json";

/// Paths used by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Monitor calibration file.
    pub calibration_file: PathBuf,
    /// Directory holding the phone profile `*.txt` files.
    pub profiles_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            calibration_file: Path::new("DisplaySettings").join("UserDisplayCalibration.txt"),
            profiles_dir: PathBuf::from("CCT_Settings"),
        }
    }
}

impl AppConfig {
    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Loads `path` if present. Missing or invalid files fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}; using default paths", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "profiles_dir": "phones" }"#).unwrap();
        assert_eq!(config.profiles_dir, PathBuf::from("phones"));
        assert_eq!(config.calibration_file, AppConfig::default().calibration_file);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = AppConfig::load_or_default(Path::new("definitely/not/here/calibrator.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_config_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("calibrator-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, "{ \"profiles_dir\": 42, ").unwrap();

        assert!(AppConfig::from_file(&path).is_err());
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
