//! Helpers for journal exports
//!
//! An export is written as a started manifest, a completed manifest listing
//! data file keys in order, and the data files themselves. Each data file key
//! encodes the strand and the sequence range it holds:
//! `2019/04/15/22/JdxjkR9bSYB5jMHWcI464T.1-4.ion`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::block::JournalBlock;
use crate::decode::{decode_blocks, parse_json};
use crate::error::{LVError, Result};

const COMPLETED_MANIFEST_SUFFIX: &str = "completed.manifest";
const STARTED_MANIFEST_SUFFIX: &str = ".started.manifest";

/// A parsed export data file key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileKey {
    /// The full key as listed in the manifest.
    pub key: String,
    /// Strand the file belongs to.
    pub strand_id: String,
    /// Sequence number of the first block in the file.
    pub first_sequence_no: u64,
    /// Sequence number of the last block in the file.
    pub last_sequence_no: u64,
}

impl DataFileKey {
    /// Parses `{prefix/}{strandId}.{first}-{last}.ion`.
    ///
    /// # Errors
    ///
    /// Returns [`LVError::InvalidExportKey`] if the key does not follow that pattern.
    pub fn parse(key: &str) -> Result<Self> {
        let invalid = || LVError::InvalidExportKey(key.to_string());
        let file_name = key.rsplit('/').next().unwrap_or(key);
        let parts: Vec<&str> = file_name.split('.').collect();
        let (strand_id, range) = match parts.as_slice() {
            [strand_id, range, "ion"] if !strand_id.is_empty() => (*strand_id, *range),
            _ => return Err(invalid()),
        };
        let (first, last) = range.split_once('-').ok_or_else(invalid)?;
        let first_sequence_no: u64 = first.parse().map_err(|_| invalid())?;
        let last_sequence_no: u64 = last.parse().map_err(|_| invalid())?;
        if first_sequence_no > last_sequence_no {
            return Err(invalid());
        }
        Ok(Self {
            key: key.to_string(),
            strand_id: strand_id.to_string(),
            first_sequence_no,
            last_sequence_no,
        })
    }
}

/// Checks that the blocks read from a data file span exactly the range in its key.
///
/// # Errors
///
/// * [`LVError::InvalidExportKey`] if `key` cannot be parsed.
/// * [`LVError::InvalidInput`] if `blocks` is empty or holds a block of another strand.
/// * [`LVError::SequenceRangeMismatch`] if the first or last sequence number differs.
pub fn check_key_range(key: &str, blocks: &[JournalBlock]) -> Result<DataFileKey> {
    let parsed = DataFileKey::parse(key)?;
    let (first, last) = match (blocks.first(), blocks.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(LVError::invalid_input(format!("data file {} holds no blocks", key))),
    };
    if let Some(stray) = blocks
        .iter()
        .find(|b| b.address.strand_id != parsed.strand_id)
    {
        return Err(LVError::invalid_input(format!(
            "data file {} for strand {} holds block {}",
            key, parsed.strand_id, stray.address
        )));
    }
    if first.address.sequence_no != parsed.first_sequence_no {
        return Err(LVError::SequenceRangeMismatch {
            key: key.to_string(),
            expected: parsed.first_sequence_no,
            actual: first.address.sequence_no,
        });
    }
    if last.address.sequence_no != parsed.last_sequence_no {
        return Err(LVError::SequenceRangeMismatch {
            key: key.to_string(),
            expected: parsed.last_sequence_no,
            actual: last.address.sequence_no,
        });
    }
    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct CompletedManifest {
    keys: Vec<String>,
}

/// Returns the ordered data file keys listed in a completed manifest.
pub fn manifest_data_keys(manifest_json: &str) -> Result<Vec<String>> {
    let manifest: CompletedManifest = parse_json("completed manifest", manifest_json)?;
    Ok(manifest.keys)
}

/// Finds the completed manifest among the object keys of an export.
pub fn find_completed_manifest<S: AsRef<str>>(keys: &[S]) -> Result<&str> {
    keys.iter()
        .map(|k| k.as_ref())
        .find(|k| k.ends_with(COMPLETED_MANIFEST_SUFFIX))
        .ok_or_else(|| LVError::not_found("completed manifest"))
}

/// Finds the manifest written when export `export_id` started under `prefix`.
pub fn find_initial_manifest<'a, S: AsRef<str>>(
    keys: &'a [S],
    prefix: &str,
    export_id: &str,
) -> Result<&'a str> {
    let expected = format!("{}{}{}", prefix, export_id, STARTED_MANIFEST_SUFFIX);
    keys.iter()
        .map(|k| k.as_ref())
        .find(|k| *k == expected)
        .ok_or_else(|| LVError::not_found(format!("initial manifest {}", expected)))
}

/// Read access to the objects of a finished export.
///
/// Implemented over whatever object store holds the export; the verifier only
/// needs to list keys and read text objects.
pub trait ExportSource {
    /// Lists every object key of the export.
    fn list_keys(&self) -> Result<Vec<String>>;
    /// Reads one object as text.
    fn read_object(&self, key: &str) -> Result<String>;
}

/// In-memory [`ExportSource`], keyed by object key.
#[derive(Debug, Clone, Default)]
pub struct MemoryExportSource {
    objects: HashMap<String, String>,
}

impl MemoryExportSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `body` under `key`, replacing any previous object.
    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<String>) {
        self.objects.insert(key.into(), body.into());
    }
}

impl ExportSource for MemoryExportSource {
    fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.objects.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn read_object(&self, key: &str) -> Result<String> {
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| LVError::not_found(format!("object {}", key)))
    }
}

/// Reads every journal block of export `export_id` written under `prefix`.
///
/// Requires the started and completed manifests, then reads the data files in
/// manifest order, checking each file's blocks against the range in its key.
/// Blocks are returned in the order read.
pub fn read_export<S: ExportSource + ?Sized>(
    source: &S,
    prefix: &str,
    export_id: &str,
) -> Result<Vec<JournalBlock>> {
    let keys = source.list_keys()?;
    log::debug!("Found {} objects under export prefix {}", keys.len(), prefix);

    let initial = find_initial_manifest(&keys, prefix, export_id)?;
    log::info!("Found the initial manifest with key: {}", initial);

    let completed = find_completed_manifest(&keys)?;
    let data_keys = manifest_data_keys(&source.read_object(completed)?)?;
    log::info!("Completed manifest {} lists {} data files", completed, data_keys.len());

    let mut blocks = Vec::new();
    for key in &data_keys {
        log::debug!("Reading data file {}", key);
        let chunk = decode_blocks(&source.read_object(key)?)?;
        check_key_range(key, &chunk)?;
        blocks.extend(chunk);
    }
    Ok(blocks)
}
