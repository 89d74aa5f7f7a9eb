use assert_matches::assert_matches;
use ledger_verify::core::hash::{sha256_hash, to_hex};
use ledger_verify::core::{verify_chain, verify_inclusion, BlockAddress};
use ledger_verify::decode::{
    decode_block, decode_block_hash, decode_blocks, decode_digest, decode_proof,
};
use ledger_verify::test_utils::{block_record_json, build_chain, digest_for, sample_proof};
use ledger_verify::LVError;

#[test]
fn test_decoded_export_chunk_verifies() {
    let blocks = build_chain("strand", 1, 4, &sha256_hash(b"genesis"));
    let chunk: String = blocks
        .iter()
        .map(block_record_json)
        .collect::<Vec<_>>()
        .join("\n");

    let decoded = decode_blocks(&chunk).unwrap();
    assert_eq!(decoded, blocks);
    assert!(verify_chain(&decoded).is_ok());
}

#[test]
fn test_block_without_entries_hash_is_missing_field() {
    let json = format!(
        r#"{{"blockAddress": {{"strandId": "s", "sequenceNo": 3}}, "blockHash": "{}", "previousBlockHash": "{}"}}"#,
        "aa".repeat(32),
        "bb".repeat(32)
    );
    assert_matches!(decode_block(&json), Err(LVError::MissingField(ref f)) if f == "entriesHash");
}

#[test]
fn test_block_without_address_is_missing_field() {
    let json = r#"{"entriesHash": "", "previousBlockHash": ""}"#;
    assert_matches!(decode_block(json), Err(LVError::MissingField(ref f)) if f == "blockAddress");
}

#[test]
fn test_anchor_block_decodes_without_block_hash() {
    let json = format!(
        r#"{{"blockAddress": {{"strandId": "s", "sequenceNo": 0}}, "entriesHash": "{}", "previousBlockHash": ""}}"#,
        "cc".repeat(32)
    );
    let block = decode_block(&json).unwrap();
    assert!(block.is_anchor());
    assert!(block.previous_block_hash.is_empty());
}

#[test]
fn test_block_hash_extraction() {
    let blocks = build_chain("s", 0, 1, &sha256_hash(b"g"));
    let json = block_record_json(&blocks[0]);
    assert_eq!(decode_block_hash(&json).unwrap(), blocks[0].block_hash);
}

#[test]
fn test_digest_and_proof_decode_into_verification() {
    let leaf = sha256_hash(b"revision");
    let proof = sample_proof("decode", 4);
    let digest = digest_for(&leaf, &proof, BlockAddress::new("s", 42));

    let proof_json = serde_json::to_string(
        &proof.hashes().iter().map(|h| to_hex(h)).collect::<Vec<_>>(),
    )
    .unwrap();
    let digest_json = format!(
        r#"{{"digest": "{}", "digestTipAddress": {{"strandId": "s", "sequenceNo": 42}}}}"#,
        to_hex(&digest.root_hash)
    );

    let decoded_proof = decode_proof(&proof_json).unwrap();
    let decoded_digest = decode_digest(&digest_json).unwrap();
    assert_eq!(decoded_proof, proof);
    assert_eq!(decoded_digest, digest);
    assert!(verify_inclusion(&leaf, &decoded_proof, &decoded_digest.root_hash).unwrap());
}

#[test]
fn test_digest_missing_tip_address() {
    let json = format!(r#"{{"digest": "{}"}}"#, "00".repeat(32));
    assert_matches!(decode_digest(&json), Err(LVError::MissingField(ref f)) if f == "digestTipAddress");
}

#[test]
fn test_bad_chunk_reports_error() {
    assert!(decode_blocks("{\"blockAddress\": ").is_err());
    assert!(decode_blocks("").unwrap().is_empty());
}
