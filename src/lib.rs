// src/lib.rs

//! Verification engine for hash-chained ledger journals.
//!
//! Given a trusted ledger digest, a leaf hash (a document revision or a journal
//! block) and an inclusion proof, [`core::verify_inclusion`] recomputes the
//! candidate root and compares it with the digest. [`core::verify_chain`]
//! independently checks that a run of exported journal blocks forms a valid
//! hash chain.
//!
//! ```
//! use ledger_verify::core::{combine, verify_inclusion, Proof};
//! use ledger_verify::core::hash::sha256_hash;
//!
//! let leaf = sha256_hash(b"doc");
//! let proof = Proof::new(vec![sha256_hash(b"a"), sha256_hash(b"b")]);
//! let root = combine(&combine(&leaf, &sha256_hash(b"a")).unwrap(), &sha256_hash(b"b")).unwrap();
//! assert!(verify_inclusion(&leaf, &proof, &root).unwrap());
//! ```

pub mod config;
pub mod core;
pub mod decode;
pub mod error;
pub mod export;
pub mod test_utils;
pub mod types;
pub mod verification;

pub use crate::config::Config;
pub use crate::error::{LVError, Result};
pub use crate::types::LogLevel;
pub use crate::verification::Verifier;

/// Loads configuration from `config_path` (defaults if absent), installs the
/// logger and returns a [`Verifier`] configured from it.
///
/// # Errors
///
/// * [`LVError::ConfigError`] if the configuration cannot be loaded.
/// * [`LVError::InvalidInput`] if a global logger has already been installed.
pub fn init(config_path: Option<&str>) -> Result<Verifier> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => match Config::config_dir() {
            Some(dir) => Config::load(dir.join("config.toml"))?,
            None => {
                let mut config = Config::default();
                config.apply_env_vars()?;
                config.validate()?;
                config
            }
        },
    };
    init_logging(&config)?;
    log::info!(
        "Ledger verifier initialised (self_check = {}, tamper_trials = {})",
        config.verification.self_check,
        config.verification.tamper_trials
    );
    Ok(Verifier::new(config.verification))
}

#[cfg(feature = "logging")]
fn init_logging(config: &Config) -> Result<()> {
    use std::fs::OpenOptions;

    let logging = &config.logging;
    let mut builder = env_logger::Builder::new();
    builder.filter_level(logging.level.to_level_filter());
    if !logging.console && !logging.file {
        builder.filter_level(log::LevelFilter::Off);
    } else if logging.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&logging.file_path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder
        .try_init()
        .map_err(|e| LVError::invalid_input(format!("logger already initialised: {}", e)))
}

#[cfg(not(feature = "logging"))]
fn init_logging(config: &Config) -> Result<()> {
    log::set_max_level(config.logging.level.to_level_filter());
    Ok(())
}
