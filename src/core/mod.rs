// src/core/mod.rs

/// SHA-256 helpers, the signed-byte hash ordering and pairwise hash combination.
pub mod hash;
/// Inclusion proofs, ledger digests and candidate-root verification.
pub mod proof;
/// Defines `BlockAddress` and `JournalBlock`, the records a journal export decodes into.
pub mod block;
/// Sequential hash-chain verification over journal blocks.
pub mod chain;
/// Single-bit corruption of hashes for negative tests and self-checks.
pub mod tamper;

pub use block::{BlockAddress, JournalBlock};
pub use chain::{verify_chain, verify_chain_from_anchor, verify_strands, StrandSummary};
pub use hash::{combine, HASH_LENGTH};
pub use proof::{candidate_root, verify_inclusion, LedgerDigest, Proof};
pub use tamper::flip_one_bit;
