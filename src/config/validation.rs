//! Configuration validation for the ledger verifier
//!
//! Checks that configured values are usable before any verification runs.

use std::path::Path;

use super::error::ConfigError;
use super::{Config, LoggingConfig, VerificationConfig};

/// Upper bound on tamper trials; each trial re-folds the whole proof.
const MAX_TAMPER_TRIALS: u32 = 10_000;

/// Validates the verifier configuration.
///
/// # Errors
///
/// Returns a `ConfigError` if any validation check fails.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_verification_config(&config.verification)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates the verification flow settings.
fn validate_verification_config(config: &VerificationConfig) -> Result<(), ConfigError> {
    if !config.self_check {
        if config.tamper_trials > 0 {
            log::debug!(
                "tamper_trials = {} is ignored while self_check is disabled",
                config.tamper_trials
            );
        }
        return Ok(());
    }

    if config.tamper_trials == 0 {
        return Err(ConfigError::invalid_value(
            "verification.tamper_trials",
            config.tamper_trials,
            "tamper_trials must be greater than 0 when self_check is enabled",
        ));
    }

    if config.tamper_trials > MAX_TAMPER_TRIALS {
        return Err(ConfigError::invalid_value(
            "verification.tamper_trials",
            config.tamper_trials,
            format!("tamper_trials must not exceed {}", MAX_TAMPER_TRIALS),
        ));
    }

    Ok(())
}

/// Validates the logging configuration.
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !config.console && !config.file {
        log::warn!("Both console and file logging are disabled. No logs will be captured.");
        return Ok(());
    }

    if config.file {
        if config.file_path.is_empty() {
            return Err(ConfigError::missing_value("logging.file_path"));
        }

        let log_path = Path::new(&config.file_path);
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::invalid_value(
                    "logging.file_path",
                    log_path.display(),
                    "Parent directory does not exist",
                ));
            }
        }
    }

    Ok(())
}
