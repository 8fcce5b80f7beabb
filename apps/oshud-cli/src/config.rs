//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --data ./salaries.json                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     OSHUD_DATA_PATH=/srv/oshud/salaries.json                           │
//! │     OSHUD_CURRENCY_SYMBOL=Tk                                           │
//! │     OSHUD_REJECT_NON_POSITIVE_ADJUSTMENTS=true                         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <file>, or the platform config dir:                       │
//! │     ~/.config/oshud-kini/oshud.toml (Linux)                            │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! data_path = "/srv/oshud/salaries.json"
//!
//! [display]
//! currency_symbol = "৳"
//!
//! [payroll]
//! reject_non_positive_adjustments = false
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use oshud_core::money::CURRENCY_SYMBOL;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "oshud.toml";
const DATA_FILE_NAME: &str = "salaries.json";

// =============================================================================
// Sections
// =============================================================================

/// Where the payroll data file lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Data file path. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Payroll policy switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Reject zero or negative adjustments instead of ignoring them.
    #[serde(default)]
    pub reject_non_positive_adjustments: bool,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub payroll: PayrollSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`oshud.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default config file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() || explicit {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file and returns where it went.
    ///
    /// Used by `oshud config --save`.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml()?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Pretty TOML rendering, as shown by `oshud config`.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        if let Some(path) = &self.store.data_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "store.data_path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies `OSHUD_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("OSHUD_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.store.data_path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("OSHUD_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Some(flag) = lookup("OSHUD_REJECT_NON_POSITIVE_ADJUSTMENTS") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.payroll.reject_non_positive_adjustments = true,
                "0" | "false" | "no" | "off" => {
                    self.payroll.reject_non_positive_adjustments = false
                }
                _ => warn!(value = %flag, "Unknown boolean in OSHUD_REJECT_NON_POSITIVE_ADJUSTMENTS"),
            }
        }
    }

    /// Data file to open: `--data`, then config, then the platform data dir.
    pub fn resolve_data_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.store.data_path.clone())
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(DATA_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "oshud", "kini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.display.currency_symbol, "৳");
        assert!(!config.payroll.reject_non_positive_adjustments);
        assert!(config.store.data_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [payroll]
            reject_non_positive_adjustments = true
            "#,
        )
        .unwrap();

        assert!(config.payroll.reject_non_positive_adjustments);
        assert_eq!(config.display.currency_symbol, "৳");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("OSHUD_DATA_PATH", "/tmp/pay.json"),
            ("OSHUD_CURRENCY_SYMBOL", "Tk"),
            ("OSHUD_REJECT_NON_POSITIVE_ADJUSTMENTS", "yes"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.data_path, Some(PathBuf::from("/tmp/pay.json")));
        assert_eq!(config.display.currency_symbol, "Tk");
        assert!(config.payroll.reject_non_positive_adjustments);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.display.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());

        config.display.currency_symbol = "৳".to_string();
        config.store.data_path = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_path_priority() {
        let mut config = AppConfig::default();
        config.store.data_path = Some(PathBuf::from("/from/config.json"));

        assert_eq!(
            config.resolve_data_path(Some(PathBuf::from("/from/cli.json"))),
            PathBuf::from("/from/cli.json")
        );
        assert_eq!(
            config.resolve_data_path(None),
            PathBuf::from("/from/config.json")
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        config.payroll.reject_non_positive_adjustments = true;
        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_toml_rendering() {
        let toml_str = AppConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[display]"));
        assert!(toml_str.contains("[payroll]"));
    }
}
