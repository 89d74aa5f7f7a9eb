// src/core/block.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::hash::to_hex;
use crate::error::{LVError, Result};

/// Position of a block within one hash-chain strand of the journal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAddress {
    /// Identifier of the strand the block belongs to.
    pub strand_id: String,
    /// Position of the block within its strand, starting at 0.
    pub sequence_no: u64,
}

impl BlockAddress {
    /// Creates a new block address.
    pub fn new(strand_id: impl Into<String>, sequence_no: u64) -> Self {
        Self {
            strand_id: strand_id.into(),
            sequence_no,
        }
    }
}

impl fmt::Display for BlockAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{strandId: \"{}\", sequenceNo: {}}}",
            self.strand_id, self.sequence_no
        )
    }
}

/// One committed transaction's entry in a journal strand.
///
/// `block_hash` is expected to equal `combine(entries_hash, previous_block_hash)`.
/// That is checked by the chain verifier, never here, so a corrupted export is
/// reported as a broken chain instead of failing at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalBlock {
    /// Where the block sits in its strand.
    pub address: BlockAddress,
    /// Hash stored for the block. Empty for a strand's anchor block.
    pub block_hash: Vec<u8>,
    /// Hash over the block's entries.
    pub entries_hash: Vec<u8>,
    /// Hash of the preceding block in the strand.
    pub previous_block_hash: Vec<u8>,
}

impl JournalBlock {
    /// Creates a `JournalBlock` from fields already known to be present.
    pub fn new(
        address: BlockAddress,
        block_hash: Vec<u8>,
        entries_hash: Vec<u8>,
        previous_block_hash: Vec<u8>,
    ) -> Self {
        Self {
            address,
            block_hash,
            entries_hash,
            previous_block_hash,
        }
    }

    /// Builds a `JournalBlock` from optionally-present decoded fields.
    ///
    /// `block_hash` may be absent only for the anchor block that starts a
    /// strand; it is then stored as the empty hash. No cross-field checks are
    /// made here.
    ///
    /// # Errors
    ///
    /// Returns [`LVError::MissingField`] if `entries_hash` or
    /// `previous_block_hash` is absent.
    pub fn from_fields(
        address: BlockAddress,
        block_hash: Option<Vec<u8>>,
        entries_hash: Option<Vec<u8>>,
        previous_block_hash: Option<Vec<u8>>,
    ) -> Result<Self> {
        let entries_hash = entries_hash.ok_or_else(|| LVError::missing_field("entriesHash"))?;
        let previous_block_hash =
            previous_block_hash.ok_or_else(|| LVError::missing_field("previousBlockHash"))?;
        Ok(Self::new(
            address,
            block_hash.unwrap_or_default(),
            entries_hash,
            previous_block_hash,
        ))
    }

    /// True if this block carries no hash of its own (a strand anchor).
    pub fn is_anchor(&self) -> bool {
        self.block_hash.is_empty()
    }

    /// Hex of the stored block hash.
    pub fn block_hash_hex(&self) -> String {
        to_hex(&self.block_hash)
    }
}
