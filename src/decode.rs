//! Typed decoding of ledger service and journal export records
//!
//! Proofs, digests, revisions and journal blocks arrive as JSON with hashes
//! encoded as hex strings. Each record is parsed into a serde struct with
//! optional fields and then converted into the core value types, so a missing
//! or malformed field surfaces here as [`LVError::MissingField`] or
//! [`LVError::Decode`] and the verification code only ever sees typed bytes.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::block::{BlockAddress, JournalBlock};
use crate::core::proof::{LedgerDigest, Proof};
use crate::error::{LVError, Result};

/// Wire form of a block address: `{"strandId": "...", "sequenceNo": 7}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAddressRecord {
    /// Strand identifier.
    pub strand_id: Option<String>,
    /// Sequence number within the strand.
    pub sequence_no: Option<u64>,
}

impl TryFrom<BlockAddressRecord> for BlockAddress {
    type Error = LVError;

    fn try_from(record: BlockAddressRecord) -> Result<Self> {
        let strand_id = record
            .strand_id
            .ok_or_else(|| LVError::missing_field("strandId"))?;
        let sequence_no = record
            .sequence_no
            .ok_or_else(|| LVError::missing_field("sequenceNo"))?;
        Ok(BlockAddress::new(strand_id, sequence_no))
    }
}

/// Wire form of one exported journal block.
///
/// Fields not needed for verification (transaction id, timestamp, entries)
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    /// Address of the block.
    pub block_address: Option<BlockAddressRecord>,
    /// Hex of the block hash.
    pub block_hash: Option<String>,
    /// Hex of the entries hash.
    pub entries_hash: Option<String>,
    /// Hex of the previous block's hash.
    pub previous_block_hash: Option<String>,
}

impl TryFrom<BlockRecord> for JournalBlock {
    type Error = LVError;

    fn try_from(record: BlockRecord) -> Result<Self> {
        let address = record
            .block_address
            .ok_or_else(|| LVError::missing_field("blockAddress"))?
            .try_into()?;
        JournalBlock::from_fields(
            address,
            decode_optional_hex("blockHash", record.block_hash)?,
            decode_optional_hex("entriesHash", record.entries_hash)?,
            decode_optional_hex("previousBlockHash", record.previous_block_hash)?,
        )
    }
}

/// Wire form of a ledger digest as returned by the ledger service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestRecord {
    /// Hex of the root hash.
    pub digest: Option<String>,
    /// Last block covered by the digest.
    pub digest_tip_address: Option<BlockAddressRecord>,
}

impl TryFrom<DigestRecord> for LedgerDigest {
    type Error = LVError;

    fn try_from(record: DigestRecord) -> Result<Self> {
        let root_hash = decode_hex_field(
            "digest",
            &record.digest.ok_or_else(|| LVError::missing_field("digest"))?,
        )?;
        let tip_address = record
            .digest_tip_address
            .ok_or_else(|| LVError::missing_field("digestTipAddress"))?
            .try_into()?;
        Ok(LedgerDigest::new(root_hash, tip_address))
    }
}

/// Wire form of a document revision; only its hash takes part in verification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRecord {
    /// Address of the block holding the revision.
    pub block_address: Option<BlockAddressRecord>,
    /// Hex of the revision hash.
    pub hash: Option<String>,
}

/// Parses one JSON document, reporting malformed input as [`LVError::Decode`].
pub(crate) fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| LVError::decode(format!("{}: malformed JSON: {}", what, e)))
}

fn decode_hex_field(field: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| LVError::decode(format!("{}: invalid hex: {}", field, e)))
}

fn decode_optional_hex(field: &str, value: Option<String>) -> Result<Option<Vec<u8>>> {
    value.map(|v| decode_hex_field(field, &v)).transpose()
}

/// Decodes a proof serialized as a JSON array of hex strings, keeping its order.
pub fn decode_proof(json: &str) -> Result<Proof> {
    let encoded: Vec<String> = parse_json("proof", json)?;
    let hashes = encoded
        .iter()
        .enumerate()
        .map(|(i, h)| decode_hex_field(&format!("proof[{}]", i), h))
        .collect::<Result<Vec<_>>>()?;
    Ok(Proof::new(hashes))
}

/// Decodes a ledger digest record.
pub fn decode_digest(json: &str) -> Result<LedgerDigest> {
    let record: DigestRecord = parse_json("digest", json)?;
    record.try_into()
}

/// Decodes a block address record.
pub fn decode_block_address(json: &str) -> Result<BlockAddress> {
    let record: BlockAddressRecord = parse_json("blockAddress", json)?;
    record.try_into()
}

/// Extracts the revision hash from a document revision record.
pub fn decode_revision_hash(json: &str) -> Result<Vec<u8>> {
    let record: RevisionRecord = parse_json("revision", json)?;
    let hash = record.hash.ok_or_else(|| LVError::missing_field("hash"))?;
    decode_hex_field("hash", &hash)
}

/// Extracts the block hash from a single block record.
pub fn decode_block_hash(json: &str) -> Result<Vec<u8>> {
    let record: BlockRecord = parse_json("block", json)?;
    let hash = record
        .block_hash
        .ok_or_else(|| LVError::missing_field("blockHash"))?;
    decode_hex_field("blockHash", &hash)
}

/// Decodes a single journal block record.
pub fn decode_block(json: &str) -> Result<JournalBlock> {
    let record: BlockRecord = parse_json("block", json)?;
    record.try_into()
}

/// Decodes every block record in an export data chunk.
///
/// Records may be separated by whitespace or newlines; order is preserved.
pub fn decode_blocks(chunk: &str) -> Result<Vec<JournalBlock>> {
    serde_json::Deserializer::from_str(chunk)
        .into_iter::<BlockRecord>()
        .map(|record| -> Result<JournalBlock> {
            let record = record
                .map_err(|e| LVError::decode(format!("block chunk: malformed JSON: {}", e)))?;
            JournalBlock::try_from(record)
        })
        .collect()
}
