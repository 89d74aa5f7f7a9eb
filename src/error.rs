//! Error types for the ledger verification engine
//!
//! This module defines the error types used throughout the crate. The main
//! error type is `LVError`, which covers both malformed input (wrong hash
//! lengths, missing fields, undecodable records) and integrity violations
//! found while walking a journal hash chain.
//!
//! A failed inclusion check is not an error: `verify_inclusion` reports it as
//! `Ok(false)`.

use crate::core::block::BlockAddress;
use thiserror::Error;

/// Main error type for the ledger verification engine
#[derive(Error, Debug)]
pub enum LVError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// A hash fed into combination or comparison did not have the expected length
    #[error("Invalid hash length for {field}: expected {expected} bytes, got {actual}")]
    InvalidHashLength {
        /// Which value had the wrong length (e.g. "leafHash", "proof[2]").
        field: String,
        /// The required length in bytes.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A field required for verification was absent from the decoded input
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Attempted to flip a bit in an empty hash
    #[error("Cannot flip a bit in an empty hash")]
    EmptyHash,

    /// A block's previous-hash pointer does not match its predecessor's hash
    #[error("Broken chain link: block {current} does not point at the hash of block {previous}")]
    BrokenChainLink {
        /// Address of the predecessor block.
        previous: BlockAddress,
        /// Address of the block whose link is broken.
        current: BlockAddress,
    },

    /// A block's stored hash cannot be reproduced from its contents
    #[error("Hash mismatch at block {address}: expected {expected}, found {actual}")]
    HashMismatch {
        /// Address of the offending block.
        address: BlockAddress,
        /// Hex of the recomputed block hash.
        expected: String,
        /// Hex of the block hash stored in the block.
        actual: String,
    },

    /// A hex string or structured record could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// An export data file key did not follow the `{strandId}.{first}-{last}.ion` convention
    #[error("Invalid export key: {0}")]
    InvalidExportKey(String),

    /// The blocks read from an export chunk do not cover the range encoded in its key
    #[error("Sequence range mismatch in {key}: expected {expected}, found {actual}")]
    SequenceRangeMismatch {
        /// The data file key.
        key: String,
        /// The sequence number encoded in the key.
        expected: u64,
        /// The sequence number found in the chunk.
        actual: u64,
    },

    /// An inclusion proof did not reproduce the trusted digest
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// A tampered input unexpectedly verified
    #[error("Self-check failed: {0}")]
    SelfCheckFailed(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for operations that can fail with a [LVError]
pub type Result<T> = std::result::Result<T, LVError>;

impl LVError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        LVError::InvalidInput(msg.into())
    }

    /// Create a new not found error
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        LVError::NotFound(what.into())
    }

    /// Create a new missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        LVError::MissingField(field.into())
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        LVError::Decode(msg.into())
    }

    /// Create a new invalid hash length error for a 32-byte hash
    pub fn invalid_hash_length<S: Into<String>>(field: S, actual: usize) -> Self {
        LVError::InvalidHashLength {
            field: field.into(),
            expected: crate::core::hash::HASH_LENGTH,
            actual,
        }
    }

    /// Returns true for errors caused by malformed input rather than a broken ledger.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LVError::InvalidHashLength { .. }
                | LVError::MissingField(_)
                | LVError::EmptyHash
                | LVError::Decode(_)
                | LVError::InvalidExportKey(_)
                | LVError::InvalidInput(_)
        )
    }
}

impl From<hex::FromHexError> for LVError {
    fn from(err: hex::FromHexError) -> Self {
        LVError::decode(format!("invalid hex: {}", err))
    }
}
