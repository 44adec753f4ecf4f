//! # Settings Module
//!
//! ## Purpose
//! Configuration of the balancer, kept in a JSON file (balancer_config.json by default).
//! A missing file is not an error: the defaults are used.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "reduce_by_gcd": true,
//!   "extra_gases": ["HCl"],
//!   "extra_sediments": ["PbI2"],
//!   "log_level": "info"
//! }
//! ```
//! Every field is optional.
//!
//! ## Usage Pattern
//! ```rust
//! use chem_balancer::settings::BalancerConfig;
//! use chem_balancer::Balancer::balancer_api::EquationBalancer;
//!
//! let config = BalancerConfig::load("balancer_config.json").unwrap();
//! let balancer = EquationBalancer::with_config(&config);
//! ```

use log::{LevelFilter, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "balancer_config.json";

/// error types for configuration and input files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File '{0}' does not exist")]
    FileNotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Configuration of the balancer.
///
/// # Fields
/// * `reduce_by_gcd` - divide the coefficients by their greatest common divisor
/// * `extra_gases` - formulas tagged [G] in addition to the built-in list
/// * `extra_sediments` - formulas tagged [S] in addition to the built-in list
/// * `log_level` - off, error, warn, info, debug or trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    pub reduce_by_gcd: bool,
    pub extra_gases: Vec<String>,
    pub extra_sediments: Vec<String>,
    pub log_level: String,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            reduce_by_gcd: true,
            extra_gases: Vec::new(),
            extra_sediments: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl BalancerConfig {
    /// Loads configuration from a JSON file, defaults if the file does not exist.
    pub fn load(config_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_file.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: BalancerConfig = serde_json::from_str(&content)?;
        config.level_filter()?;
        info!("configuration loaded from '{}'", path.display());
        Ok(config)
    }

    /// Loads configuration from a file that must exist
    pub fn load_required(config_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_file.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Self::load(path)
    }

    pub fn save(&self, config_file: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = BalancerConfig::default();
        assert!(config.reduce_by_gcd);
        assert!(config.extra_gases.is_empty());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = BalancerConfig::load("no_such_balancer_config.json").unwrap();
        assert_eq!(config, BalancerConfig::default());
        assert!(matches!(
            BalancerConfig::load_required("no_such_balancer_config.json"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_partial_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = json!({
            "extra_gases": ["HCl"],
            "log_level": "debug"
        });
        writeln!(temp_file, "{}", content).unwrap();

        let config = BalancerConfig::load(temp_file.path()).unwrap();
        assert!(config.reduce_by_gcd);
        assert_eq!(config.extra_gases, vec!["HCl".to_string()]);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{ \"reduce_by_gcd\": ").unwrap();
        assert!(matches!(
            BalancerConfig::load(temp_file.path()),
            Err(ConfigError::Json(_))
        ));

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", json!({ "log_level": "loud" })).unwrap();
        assert!(matches!(
            BalancerConfig::load(temp_file.path()),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = BalancerConfig {
            reduce_by_gcd: false,
            extra_sediments: vec!["PbI2".to_string()],
            ..BalancerConfig::default()
        };
        config.save(temp_file.path()).unwrap();
        let loaded = BalancerConfig::load_required(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
