// src/test_utils.rs

//! Builders for synthetic ledger data shared by unit tests, integration tests
//! and benches.

use crate::core::block::{BlockAddress, JournalBlock};
use crate::core::hash::{combine, sha256_hash, to_hex};
use crate::core::proof::{candidate_root, LedgerDigest, Proof};

/// Builds `len` correctly chained blocks on `strand_id`, starting at sequence
/// number `first_seq` and linking the first block to `genesis_hash`.
pub fn build_chain(strand_id: &str, first_seq: u64, len: usize, genesis_hash: &[u8]) -> Vec<JournalBlock> {
    let mut blocks: Vec<JournalBlock> = Vec::with_capacity(len);
    let mut previous = genesis_hash.to_vec();
    for i in 0..len as u64 {
        let seq = first_seq + i;
        let entries_hash = sha256_hash(format!("entries:{}:{}", strand_id, seq).as_bytes());
        let block_hash = combine(&entries_hash, &previous).unwrap_or_default();
        blocks.push(JournalBlock::new(
            BlockAddress::new(strand_id, seq),
            block_hash.clone(),
            entries_hash,
            previous,
        ));
        previous = block_hash;
    }
    blocks
}

/// A proof of `depth` distinct sibling hashes derived from `seed`.
pub fn sample_proof(seed: &str, depth: usize) -> Proof {
    Proof::new(
        (0..depth)
            .map(|i| sha256_hash(format!("{}:{}", seed, i).as_bytes()))
            .collect(),
    )
}

/// A digest whose root is exactly what `leaf_hash` and `proof` fold to.
pub fn digest_for(leaf_hash: &[u8], proof: &Proof, tip: BlockAddress) -> LedgerDigest {
    LedgerDigest::new(candidate_root(leaf_hash, proof).unwrap_or_default(), tip)
}

/// Serializes a block the way an export data file records it, with hex hashes.
pub fn block_record_json(block: &JournalBlock) -> String {
    serde_json::json!({
        "blockAddress": {
            "strandId": block.address.strand_id,
            "sequenceNo": block.address.sequence_no,
        },
        "transactionId": format!("tx-{}", block.address.sequence_no),
        "blockHash": to_hex(&block.block_hash),
        "entriesHash": to_hex(&block.entries_hash),
        "previousBlockHash": to_hex(&block.previous_block_hash),
    })
    .to_string()
}
