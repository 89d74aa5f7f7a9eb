//! Configuration management for the ledger verifier
//!
//! This module handles loading, validating, and providing access to the
//! verifier configuration. It supports loading configuration from a TOML file,
//! environment variable overrides and programmatic construction.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod validation;

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;

#[cfg(test)]
#[path = "tests/config_mod_tests.rs"]
mod config_mod_tests;

use std::{
    env,
    fs,
    path::{Path, PathBuf},
};
use directories::ProjectDirs;

use serde::{Deserialize, Serialize};

use crate::types::LogLevel;

/// Re-export the error type
pub use error::ConfigError;

/// The environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "LV_";

/// The application name used for finding config directories
const APP_NAME: &str = "ledger-verify";

/// Main configuration structure for the ledger verifier.
///
/// # Example
///
/// ```no_run
/// use ledger_verify::config::Config;
///
/// // A path that does not exist falls back to defaults.
/// let config = Config::load("path/that/hopefully/does/not/exist.toml").unwrap();
/// assert!(config.verification.self_check);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Verification flow configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the revision, block and export verification flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationConfig {
    /// After a successful inclusion check, also confirm that single-bit
    /// corruptions of the inputs are rejected.
    pub self_check: bool,
    /// Number of independent bit flips tried per corrupted input.
    pub tamper_trials: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            self_check: true,
            tamper_trials: 1,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
    /// Whether to log to console
    pub console: bool,
    /// Whether to log to file
    pub file: bool,
    /// Path to log file (if file logging is enabled)
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
            file: false,
            file_path: "./ledger-verify.log".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the specified path.
    ///
    /// A missing file falls back to the built-in defaults. In both cases
    /// `LV_`-prefixed environment variables are applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read,
    /// parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(config_str) => {
                let mut config: Config = toml::from_str(&config_str)?;

                config.apply_env_vars()?;
                config.validate()?;

                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config file not found at {}, using defaults", path.display());
                let mut config = Self::default();
                config.apply_env_vars()?;
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                log::error!("Failed to read config file {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Recognised variables:
    /// `LV_LOGGING_LEVEL`, `LV_VERIFICATION_SELF_CHECK`, `LV_VERIFICATION_TAMPER_TRIALS`.
    ///
    /// # Errors
    ///
    /// Returns an error if any recognised variable cannot be parsed.
    pub fn apply_env_vars(&mut self) -> Result<(), ConfigError> {
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                if value.trim().is_empty() {
                    continue;
                }

                match stripped.to_lowercase().as_str() {
                    "logging_level" => {
                        self.logging.level = value.parse().map_err(|_| {
                            ConfigError::invalid_value("logging.level", &value, "Invalid log level")
                        })?;
                    }
                    "verification_self_check" => {
                        self.verification.self_check = value.trim().parse().map_err(|_| {
                            ConfigError::invalid_value(
                                "verification.self_check",
                                &value,
                                "Expected true or false",
                            )
                        })?;
                    }
                    "verification_tamper_trials" => {
                        self.verification.tamper_trials = value.trim().parse().map_err(|_| {
                            ConfigError::invalid_value(
                                "verification.tamper_trials",
                                &value,
                                "Expected a non-negative integer",
                            )
                        })?;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Returns the path to the directory where configuration files should be stored.
    ///
    /// This is OS-specific, e.g. `$HOME/.config/ledger-verify` on Linux.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "ledgerverify", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }
}
