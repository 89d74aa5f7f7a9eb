//! Shared type definitions for the ledger verifier

mod log_level;

pub use log_level::LogLevel;
