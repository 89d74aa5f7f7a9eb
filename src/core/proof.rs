// src/core/proof.rs

use serde::{Deserialize, Serialize};

use crate::core::block::BlockAddress;
use crate::core::hash::{check_hash_length, combine};
use crate::error::Result;

/// Ordered sibling hashes for an inclusion proof, in the order the ledger served them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof(Vec<Vec<u8>>);

impl Proof {
    /// Wraps the sibling hashes without reordering them.
    pub fn new(hashes: Vec<Vec<u8>>) -> Self {
        Self(hashes)
    }

    /// The sibling hashes in proof order.
    pub fn hashes(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Number of sibling hashes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the proof has no siblings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Vec<u8>>> for Proof {
    fn from(hashes: Vec<Vec<u8>>) -> Self {
        Self::new(hashes)
    }
}

/// The ledger's trusted root hash and the block address it covers.
///
/// Always supplied by the caller; the verifier never derives one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDigest {
    /// Trusted root hash of the ledger.
    pub root_hash: Vec<u8>,
    /// Last block covered by `root_hash`.
    pub tip_address: BlockAddress,
}

impl LedgerDigest {
    /// Creates a digest from its root hash and tip address.
    pub fn new(root_hash: Vec<u8>, tip_address: BlockAddress) -> Self {
        Self {
            root_hash,
            tip_address,
        }
    }
}

fn check_proof_inputs(leaf_hash: &[u8], proof: &Proof) -> Result<()> {
    check_hash_length("leafHash", leaf_hash, true)?;
    for (i, sibling) in proof.hashes().iter().enumerate() {
        check_hash_length(&format!("proof[{}]", i), sibling, true)?;
    }
    Ok(())
}

/// Folds `leaf_hash` through every sibling in `proof`, in order, with [`combine`].
///
/// # Errors
///
/// Returns [`crate::error::LVError::InvalidHashLength`] before any hashing if the
/// leaf or a sibling is neither empty nor 32 bytes.
pub fn candidate_root(leaf_hash: &[u8], proof: &Proof) -> Result<Vec<u8>> {
    check_proof_inputs(leaf_hash, proof)?;
    proof
        .hashes()
        .iter()
        .try_fold(leaf_hash.to_vec(), |acc, sibling| combine(&acc, sibling))
}

/// Checks that `leaf_hash` and `proof` reproduce `trusted_root`.
///
/// A non-matching root is `Ok(false)`, not an error.
///
/// # Errors
///
/// Returns [`crate::error::LVError::InvalidHashLength`] if `trusted_root` is not
/// 32 bytes or the leaf or a sibling is neither empty nor 32 bytes.
pub fn verify_inclusion(leaf_hash: &[u8], proof: &Proof, trusted_root: &[u8]) -> Result<bool> {
    check_hash_length("trustedRoot", trusted_root, false)?;
    let candidate = candidate_root(leaf_hash, proof)?;
    Ok(candidate == trusted_root)
}

/// Verifies a document revision hash against a ledger digest.
pub fn verify_document(revision_hash: &[u8], digest: &LedgerDigest, proof: &Proof) -> Result<bool> {
    verify_inclusion(revision_hash, proof, &digest.root_hash)
}

/// Verifies a journal block's own hash against a ledger digest.
pub fn verify_block_hash(block_hash: &[u8], digest: &LedgerDigest, proof: &Proof) -> Result<bool> {
    verify_inclusion(block_hash, proof, &digest.root_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::sha256_hash;
    use crate::error::LVError;
    use assert_matches::assert_matches;

    #[test]
    fn test_empty_proof_root_is_leaf() {
        let leaf = sha256_hash(b"doc");
        assert_eq!(candidate_root(&leaf, &Proof::default()).unwrap(), leaf);
        assert!(verify_inclusion(&leaf, &Proof::default(), &leaf).unwrap());
    }

    #[test]
    fn test_fold_is_left_to_right() {
        let leaf = sha256_hash(b"doc");
        let a = sha256_hash(b"a");
        let b = sha256_hash(b"b");
        let proof = Proof::new(vec![a.clone(), b.clone()]);
        let expected = combine(&combine(&leaf, &a).unwrap(), &b).unwrap();
        assert_eq!(candidate_root(&leaf, &proof).unwrap(), expected);
    }

    #[test]
    fn test_malformed_sibling_is_reported_by_index() {
        let leaf = sha256_hash(b"doc");
        let proof = Proof::new(vec![sha256_hash(b"a"), vec![0u8; 31]]);
        let err = verify_inclusion(&leaf, &proof, &leaf).unwrap_err();
        assert_matches!(err, LVError::InvalidHashLength { ref field, actual: 31, .. } if field == "proof[1]");
    }

    #[test]
    fn test_trusted_root_must_be_full_length() {
        let leaf = sha256_hash(b"doc");
        let err = verify_inclusion(&leaf, &Proof::default(), &[]).unwrap_err();
        assert_matches!(err, LVError::InvalidHashLength { ref field, .. } if field == "trustedRoot");
    }

    #[test]
    fn test_document_and_block_shapes_agree() {
        let leaf = sha256_hash(b"block");
        let proof = Proof::new(vec![sha256_hash(b"sibling")]);
        let root = candidate_root(&leaf, &proof).unwrap();
        let digest = LedgerDigest::new(root, BlockAddress::new("s", 3));
        assert!(verify_document(&leaf, &digest, &proof).unwrap());
        assert!(verify_block_hash(&leaf, &digest, &proof).unwrap());
    }
}
