//! Configuration for the processing pipelines.

use std::path::Path;

use serde::{Deserialize, Serialize};

use erg_common::config::ErgConfig;
use erg_common::error::{ErgError, Result};

use crate::deviation::DEFAULT_WINDOW_SEC;

/// Pipeline settings layered on top of the shared data configuration.
///
/// ```yaml
/// local_data_dir: /data/erg
/// deviation_window_sec: 1800
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    #[serde(flatten)]
    pub data: ErgConfig,

    /// Full width of the centred averaging window for the deviation filter.
    pub deviation_window_sec: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            data: ErgConfig::default(),
            deviation_window_sec: DEFAULT_WINDOW_SEC,
        }
    }
}

impl ProcessorConfig {
    /// Load and validate a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ErgError::Config(format!(
                "failed to read config from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ProcessorConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.data.validate()?;
        if !(self.deviation_window_sec.is_finite() && self.deviation_window_sec > 0.0) {
            return Err(ErgError::Config(format!(
                "deviation_window_sec must be > 0, got {}",
                self.deviation_window_sec
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.deviation_window_sec, 3600.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_flattened() {
        let config =
            ProcessorConfig::from_yaml("local_data_dir: /data/erg\ndeviation_window_sec: 1800\n")
                .unwrap();
        assert_eq!(config.data.local_data_dir, PathBuf::from("/data/erg"));
        assert_eq!(config.deviation_window_sec, 1800.0);
    }

    #[test]
    fn test_invalid_window() {
        let err = ProcessorConfig::from_yaml("deviation_window_sec: 0\n").unwrap_err();
        assert!(matches!(err, ErgError::Config(_)));
    }
}
