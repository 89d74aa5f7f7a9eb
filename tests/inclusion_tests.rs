use ledger_verify::core::hash::{sha256_hash, sha256_hash_concat};
use ledger_verify::core::tamper::flip_one_bit_with;
use ledger_verify::core::{candidate_root, verify_inclusion, Proof};
use ledger_verify::test_utils::sample_proof;
use ledger_verify::LVError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hashes the pair in the order the ledger uses, written out byte by byte:
/// last byte most significant, bytes read as signed.
fn join_by_hand(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut a_first = false;
    for i in (0..32).rev() {
        let (x, y) = (a[i] as i8, b[i] as i8);
        if x != y {
            a_first = x < y;
            break;
        }
    }
    if a_first {
        sha256_hash_concat(&[a, b])
    } else {
        sha256_hash_concat(&[b, a])
    }
}

#[test]
fn test_doc_scenario() {
    let leaf = sha256_hash(b"doc");
    let a = sha256_hash(b"a");
    let b = sha256_hash(b"b");
    let proof = Proof::new(vec![a.clone(), b.clone()]);
    let root = join_by_hand(&join_by_hand(&leaf, &a), &b);

    assert!(verify_inclusion(&leaf, &proof, &root).unwrap());
    assert!(!verify_inclusion(&leaf, &proof, &sha256_hash(b"wrong")).unwrap());
}

#[test]
fn test_proof_round_trip() {
    for depth in 0..12 {
        let leaf = sha256_hash(format!("leaf-{}", depth).as_bytes());
        let proof = sample_proof("round-trip", depth);
        let root = candidate_root(&leaf, &proof).unwrap();
        assert!(verify_inclusion(&leaf, &proof, &root).unwrap(), "depth {}", depth);
    }
}

#[test]
fn test_proof_order_matters() {
    let leaf = sha256_hash(b"doc");
    let proof = sample_proof("order", 3);
    let root = candidate_root(&leaf, &proof).unwrap();
    let mut reversed = proof.hashes().to_vec();
    reversed.reverse();
    assert!(!verify_inclusion(&leaf, &Proof::new(reversed), &root).unwrap());
}

#[test]
fn test_tamper_sensitivity() {
    let mut rng = StdRng::seed_from_u64(42);
    let leaf = sha256_hash(b"revision");
    let proof = sample_proof("tamper", 6);
    let root = candidate_root(&leaf, &proof).unwrap();
    assert!(verify_inclusion(&leaf, &proof, &root).unwrap());

    for _ in 0..200 {
        let bad_root = flip_one_bit_with(&root, &mut rng).unwrap();
        assert!(!verify_inclusion(&leaf, &proof, &bad_root).unwrap());

        let bad_leaf = flip_one_bit_with(&leaf, &mut rng).unwrap();
        assert!(!verify_inclusion(&bad_leaf, &proof, &root).unwrap());

        let idx = rng.gen_range(0..proof.len());
        let mut siblings = proof.hashes().to_vec();
        siblings[idx] = flip_one_bit_with(&siblings[idx], &mut rng).unwrap();
        assert!(!verify_inclusion(&leaf, &Proof::new(siblings), &root).unwrap());
    }
}

#[test]
fn test_malformed_inputs_raise() {
    let leaf = sha256_hash(b"doc");
    let proof = sample_proof("m", 2);
    let root = candidate_root(&leaf, &proof).unwrap();

    assert!(matches!(
        verify_inclusion(&leaf[..16], &proof, &root),
        Err(LVError::InvalidHashLength { actual: 16, .. })
    ));
    assert!(matches!(
        verify_inclusion(&leaf, &proof, &root[..31]),
        Err(LVError::InvalidHashLength { actual: 31, .. })
    ));
}
