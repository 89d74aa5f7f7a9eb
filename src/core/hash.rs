// src/core/hash.rs

use crate::error::{LVError, Result};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;

/// Length in bytes of every non-empty hash handled by the verifier (SHA-256 output).
pub const HASH_LENGTH: usize = 32;

/// Computes the SHA256 hash of the given data.
pub fn sha256_hash(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes the SHA256 hash of a list of byte slices concatenated together.
pub fn sha256_hash_concat(data_slices: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for slice in data_slices {
        hasher.update(slice);
    }
    hasher.finalize().to_vec()
}

/// Lowercase hex rendering used for link checks and log output.
pub fn to_hex(hash: &[u8]) -> String {
    hex::encode(hash)
}

/// Reads a byte as a two's-complement signed value: `b < 128 ? b : b - 256`.
pub fn signed_byte_value(b: u8) -> i16 {
    if b < 128 {
        b as i16
    } else {
        b as i16 - 256
    }
}

/// Checks that `bytes` is a full 32-byte hash, or empty when `allow_empty` is set.
///
/// `field` names the value in the resulting [`LVError::InvalidHashLength`].
pub fn check_hash_length(field: &str, bytes: &[u8], allow_empty: bool) -> Result<()> {
    if bytes.len() == HASH_LENGTH || (allow_empty && bytes.is_empty()) {
        Ok(())
    } else {
        Err(LVError::invalid_hash_length(field, bytes.len()))
    }
}

/// Compares two hashes as little-endian numbers of signed bytes.
///
/// The last byte is the most significant and is compared first. Each byte is
/// read through [`signed_byte_value`], so `0x80` orders below `0x00`.
///
/// # Errors
///
/// Returns [`LVError::InvalidHashLength`] unless both inputs are exactly 32 bytes.
pub fn compare_hash_values(h1: &[u8], h2: &[u8]) -> Result<Ordering> {
    check_hash_length("h1", h1, false)?;
    check_hash_length("h2", h2, false)?;
    for i in (0..HASH_LENGTH).rev() {
        let difference = signed_byte_value(h1[i]) - signed_byte_value(h2[i]);
        if difference != 0 {
            return Ok(difference.cmp(&0));
        }
    }
    Ok(Ordering::Equal)
}

/// Combines two hashes into their parent hash.
///
/// An empty input is the identity element and the other input is returned
/// unchanged. Otherwise the pair is put in canonical order with
/// [`compare_hash_values`], concatenated smaller-first and hashed with SHA-256,
/// which makes `combine(a, b) == combine(b, a)`.
///
/// # Errors
///
/// Returns [`LVError::InvalidHashLength`] if both inputs are non-empty and either
/// is not 32 bytes long.
pub fn combine(h1: &[u8], h2: &[u8]) -> Result<Vec<u8>> {
    if h1.is_empty() {
        return Ok(h2.to_vec());
    }
    if h2.is_empty() {
        return Ok(h1.to_vec());
    }
    let (first, second) = match compare_hash_values(h1, h2)? {
        Ordering::Less => (h1, h2),
        _ => (h2, h1),
    };
    Ok(sha256_hash_concat(&[first, second]))
}
