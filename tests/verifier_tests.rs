use assert_matches::assert_matches;
use ledger_verify::config::VerificationConfig;
use ledger_verify::core::hash::sha256_hash;
use ledger_verify::core::{BlockAddress, LedgerDigest, Proof};
use ledger_verify::test_utils::{digest_for, sample_proof};
use ledger_verify::{LVError, Verifier};

fn verifier(trials: u32) -> Verifier {
    Verifier::new(VerificationConfig {
        self_check: true,
        tamper_trials: trials,
    })
}

#[test]
fn test_verify_revision_with_self_check() {
    let revision = sha256_hash(b"registration v1");
    let proof = sample_proof("revision", 5);
    let digest = digest_for(&revision, &proof, BlockAddress::new("s", 99));
    assert!(verifier(64).verify_revision(&revision, &digest, &proof).is_ok());
}

#[test]
fn test_verify_revision_against_wrong_digest() {
    let revision = sha256_hash(b"registration v1");
    let proof = sample_proof("revision", 5);
    let digest = LedgerDigest::new(sha256_hash(b"some other ledger"), BlockAddress::new("s", 99));
    let err = verifier(1).verify_revision(&revision, &digest, &proof).unwrap_err();
    assert_matches!(err, LVError::VerificationFailed(_));
}

#[test]
fn test_verify_block_with_self_check() {
    let block_hash = sha256_hash(b"block 14");
    let proof = sample_proof("block", 7);
    let digest = digest_for(&block_hash, &proof, BlockAddress::new("s", 20));
    assert!(verifier(64).verify_block(&block_hash, &digest, &proof).is_ok());
}

#[test]
fn test_verify_block_without_self_check() {
    let block_hash = sha256_hash(b"block 14");
    let proof = sample_proof("block", 0);
    let digest = digest_for(&block_hash, &proof, BlockAddress::new("s", 14));
    let v = Verifier::new(VerificationConfig {
        self_check: false,
        tamper_trials: 0,
    });
    assert!(v.verify_block(&block_hash, &digest, &proof).is_ok());
}

#[test]
fn test_malformed_proof_is_input_error() {
    let block_hash = sha256_hash(b"block");
    let mut siblings = sample_proof("block", 2).hashes().to_vec();
    siblings.push(vec![1, 2, 3]);
    let digest = LedgerDigest::new(sha256_hash(b"root"), BlockAddress::new("s", 1));
    let err = verifier(1)
        .verify_block(&block_hash, &digest, &siblings.into())
        .unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_empty_leaf_hash_is_rejected() {
    let sibling = sha256_hash(b"sibling");
    let digest = LedgerDigest::new(sibling.clone(), BlockAddress::new("s", 3));
    let proof = Proof::new(vec![sibling]);
    let v = Verifier::new(VerificationConfig {
        self_check: false,
        tamper_trials: 0,
    });

    let err = v.verify_revision(&[], &digest, &proof).unwrap_err();
    assert_matches!(
        err,
        LVError::InvalidHashLength { ref field, expected: 32, actual: 0 } if field == "revisionHash"
    );

    let err = verifier(1).verify_block(&[], &digest, &proof).unwrap_err();
    assert_matches!(
        err,
        LVError::InvalidHashLength { ref field, actual: 0, .. } if field == "blockHash"
    );
}
