//! Configuration for local data staging.
//!
//! Loaded from a YAML file. The only setting the processing core relies on is
//! `local_data_dir`; the remote base URL is carried so that download helpers
//! outside this workspace resolve archives the same way.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ErgError, Result};

/// Fixed remote base for OMTI ASI calibration archives.
pub const DEFAULT_REMOTE_DATA_DIR: &str =
    "https://ergsc.isee.nagoya-u.ac.jp/data/ergsc/ground/camera/omti/asi/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErgConfig {
    /// Base directory for cached remote files.
    pub local_data_dir: PathBuf,
    /// Remote base URL (must end with '/').
    pub remote_data_dir: String,
}

impl Default for ErgConfig {
    fn default() -> Self {
        Self {
            local_data_dir: PathBuf::from("erg_data"),
            remote_data_dir: DEFAULT_REMOTE_DATA_DIR.to_string(),
        }
    }
}

impl ErgConfig {
    /// Load and validate a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ErgError::Config(format!(
                "failed to read config from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML content.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ErgConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        tracing::debug!(local_data_dir = ?config.local_data_dir, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.local_data_dir.as_os_str().is_empty() {
            return Err(ErgError::Config("local_data_dir must not be empty".to_string()));
        }
        if !self.remote_data_dir.ends_with('/') {
            return Err(ErgError::Config(format!(
                "remote_data_dir must end with '/': {}",
                self.remote_data_dir
            )));
        }
        Ok(())
    }

    /// Where the calibration ZIP for a site/wavelength is expected to be staged.
    pub fn calibration_archive_path(&self, site: &str, wavelength: &str) -> PathBuf {
        self.local_data_dir
            .join("omti")
            .join("asi")
            .join("calibration")
            .join(format!("{}_{}.zip", site.to_lowercase(), wavelength))
    }

    /// Remote URL of the calibration ZIP for a site/wavelength.
    pub fn calibration_archive_url(&self, site: &str, wavelength: &str) -> String {
        format!(
            "{}calibration/{}_{}.zip",
            self.remote_data_dir,
            site.to_lowercase(),
            wavelength
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ErgConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.local_data_dir, PathBuf::from("erg_data"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ErgConfig::from_yaml("local_data_dir: /data/erg\n").unwrap();
        assert_eq!(config.local_data_dir, PathBuf::from("/data/erg"));
        assert_eq!(config.remote_data_dir, DEFAULT_REMOTE_DATA_DIR);
    }

    #[test]
    fn test_invalid_remote_rejected() {
        let err = ErgConfig::from_yaml("remote_data_dir: https://example.org/data\n").unwrap_err();
        assert!(matches!(err, ErgError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "local_data_dir: /tmp/erg_cache").unwrap();

        let config = ErgConfig::load(file.path()).unwrap();
        assert_eq!(
            config.calibration_archive_path("STA", "5577"),
            PathBuf::from("/tmp/erg_cache/omti/asi/calibration/sta_5577.zip")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = ErgConfig::load("/nonexistent/erg.yaml").unwrap_err();
        assert!(matches!(err, ErgError::Config(_)));
    }

    #[test]
    fn test_archive_url() {
        let config = ErgConfig::default();
        assert_eq!(
            config.calibration_archive_url("ath", "6300"),
            format!("{}calibration/ath_6300.zip", DEFAULT_REMOTE_DATA_DIR)
        );
    }
}
