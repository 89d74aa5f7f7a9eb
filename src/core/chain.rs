// src/core/chain.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::block::JournalBlock;
use crate::core::hash::{combine, to_hex};
use crate::error::{LVError, Result};

/// Result of verifying one strand of a journal export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandSummary {
    /// The strand that was verified.
    pub strand_id: String,
    /// Sequence number of the first block seen.
    pub first_sequence_no: u64,
    /// Sequence number of the last block seen.
    pub last_sequence_no: u64,
    /// Number of blocks in the strand.
    pub block_count: usize,
    /// Hex of the last block's hash.
    pub tip_hash: String,
}

/// Checks that `curr` links to `prev` and that its hash is reproducible.
///
/// Link first: `prev.block_hash` must equal `curr.previous_block_hash`. Then the
/// content: `combine(curr.entries_hash, prev.block_hash)` must equal `curr.block_hash`.
fn compare_journal_blocks(prev: &JournalBlock, curr: &JournalBlock) -> Result<()> {
    if to_hex(&prev.block_hash) != to_hex(&curr.previous_block_hash) {
        log::debug!(
            "Link mismatch: {} has hash {}, {} points at {}",
            prev.address,
            prev.block_hash_hex(),
            curr.address,
            to_hex(&curr.previous_block_hash)
        );
        return Err(LVError::BrokenChainLink {
            previous: prev.address.clone(),
            current: curr.address.clone(),
        });
    }
    let expected = combine(&curr.entries_hash, &prev.block_hash)?;
    if expected != curr.block_hash {
        return Err(LVError::HashMismatch {
            address: curr.address.clone(),
            expected: to_hex(&expected),
            actual: curr.block_hash_hex(),
        });
    }
    Ok(())
}

/// Verifies that `blocks` form an unbroken hash chain.
///
/// `blocks` must already be ordered by increasing sequence number within a
/// single strand. The first block is taken as given; every later block is
/// checked against its predecessor and the first violation aborts the walk.
/// An empty slice verifies trivially.
///
/// # Errors
///
/// * [`LVError::BrokenChainLink`] naming both addresses when a previous-hash
///   pointer does not match.
/// * [`LVError::HashMismatch`] naming the block whose hash cannot be reproduced.
/// * [`LVError::InvalidHashLength`] if a hash involved is malformed.
pub fn verify_chain(blocks: &[JournalBlock]) -> Result<()> {
    let Some((first, rest)) = blocks.split_first() else {
        return Ok(());
    };
    rest.iter().try_fold(first, |prev, curr| {
        compare_journal_blocks(prev, curr).map(|()| curr)
    })?;
    Ok(())
}

/// Like [`verify_chain`], but also checks the first block against `anchor`,
/// a block the caller already trusts (for example one verified against a
/// ledger digest with an inclusion proof).
pub fn verify_chain_from_anchor(anchor: &JournalBlock, blocks: &[JournalBlock]) -> Result<()> {
    if let Some(first) = blocks.first() {
        compare_journal_blocks(anchor, first)?;
    }
    verify_chain(blocks)
}

/// Splits a possibly interleaved block sequence by strand, keeping input order
/// within each strand and strands in order of first appearance.
pub fn group_by_strand(blocks: Vec<JournalBlock>) -> Vec<(String, Vec<JournalBlock>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut strands: Vec<(String, Vec<JournalBlock>)> = Vec::new();
    for block in blocks {
        let strand_id = block.address.strand_id.clone();
        match index.get(&strand_id) {
            Some(&i) => strands[i].1.push(block),
            None => {
                index.insert(strand_id.clone(), strands.len());
                strands.push((strand_id, vec![block]));
            }
        }
    }
    strands
}

/// Groups `blocks` by strand and runs [`verify_chain`] on each strand.
///
/// Stops at the first strand that fails.
pub fn verify_strands(blocks: Vec<JournalBlock>) -> Result<Vec<StrandSummary>> {
    let mut summaries = Vec::new();
    for (strand_id, strand) in group_by_strand(blocks) {
        verify_chain(&strand)?;
        // group_by_strand never yields an empty strand
        if let (Some(first), Some(last)) = (strand.first(), strand.last()) {
            log::debug!(
                "Strand {} verified: {} blocks, sequence {}..={}",
                strand_id,
                strand.len(),
                first.address.sequence_no,
                last.address.sequence_no
            );
            summaries.push(StrandSummary {
                strand_id,
                first_sequence_no: first.address.sequence_no,
                last_sequence_no: last.address.sequence_no,
                block_count: strand.len(),
                tip_hash: last.block_hash_hex(),
            });
        }
    }
    Ok(summaries)
}
