// src/core/tamper.rs

use rand::Rng;

use crate::error::{LVError, Result};

/// Number of bits in a byte; the bit position is drawn from `0..BITS_PER_BYTE`.
const BITS_PER_BYTE: u32 = 8;

/// Returns a copy of `hash` with one randomly chosen bit flipped.
///
/// Only meant for manufacturing negative inputs; the argument is left untouched.
///
/// # Errors
///
/// Returns [`LVError::EmptyHash`] if `hash` is empty.
pub fn flip_one_bit(hash: &[u8]) -> Result<Vec<u8>> {
    flip_one_bit_with(hash, &mut rand::thread_rng())
}

/// Same as [`flip_one_bit`], drawing the byte index and bit position from `rng`.
pub fn flip_one_bit_with<R: Rng + ?Sized>(hash: &[u8], rng: &mut R) -> Result<Vec<u8>> {
    if hash.is_empty() {
        return Err(LVError::EmptyHash);
    }
    let byte_pos = rng.gen_range(0..hash.len());
    let bit_shift = rng.gen_range(0..BITS_PER_BYTE);
    let mut altered = hash.to_vec();
    altered[byte_pos] ^= 1u8 << bit_shift;
    Ok(altered)
}
