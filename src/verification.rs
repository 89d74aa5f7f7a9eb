//! Verification flows built on the core checks
//!
//! [`Verifier`] wraps the three ways the ledger gets verified: a document
//! revision against a digest, a journal block against a digest, and a whole
//! journal export as a set of hash chains. The inclusion flows turn a
//! non-matching proof into [`LVError::VerificationFailed`] and, when
//! `self_check` is on, confirm that single-bit corruptions of the inputs are
//! rejected as well.

use crate::config::VerificationConfig;
use crate::core::block::JournalBlock;
use crate::core::chain::{verify_strands, StrandSummary};
use crate::core::hash::{check_hash_length, to_hex};
use crate::core::proof::{verify_block_hash, verify_document, LedgerDigest, Proof};
use crate::core::tamper::flip_one_bit;
use crate::error::{LVError, Result};
use crate::export::{check_key_range, read_export, ExportSource};

/// Runs verification flows with a given [`VerificationConfig`].
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerificationConfig,
}

impl Verifier {
    /// Creates a verifier with the given settings.
    pub fn new(config: VerificationConfig) -> Self {
        Self { config }
    }

    /// The settings this verifier runs with.
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    fn tamper_trials(&self) -> u32 {
        if self.config.self_check {
            self.config.tamper_trials
        } else {
            0
        }
    }

    /// Verifies a document revision hash against a ledger digest.
    ///
    /// # Errors
    ///
    /// * [`LVError::VerificationFailed`] if the proof does not reproduce the digest.
    /// * [`LVError::SelfCheckFailed`] if a corrupted revision hash still verifies.
    /// * [`LVError::InvalidHashLength`] if the leaf hash is not exactly 32 bytes.
    /// * Input errors from the inclusion check.
    pub fn verify_revision(
        &self,
        revision_hash: &[u8],
        digest: &LedgerDigest,
        proof: &Proof,
    ) -> Result<()> {
        check_hash_length("revisionHash", revision_hash, false)?;
        log::info!(
            "Verifying document revision against digest with tip address {}",
            digest.tip_address
        );
        log::debug!(
            "revision hash = {}, digest = {}, proof length = {}",
            to_hex(revision_hash),
            to_hex(&digest.root_hash),
            proof.len()
        );
        if !verify_document(revision_hash, digest, proof)? {
            log::error!("Document revision {} is not verified", to_hex(revision_hash));
            return Err(LVError::VerificationFailed(
                "document revision is not verified".to_string(),
            ));
        }
        log::info!("Success! The document is verified.");

        for _ in 0..self.tamper_trials() {
            let altered = flip_one_bit(revision_hash)?;
            log::debug!("Altered document hash: {}", to_hex(&altered));
            if verify_document(&altered, digest, proof)? {
                return Err(LVError::SelfCheckFailed(format!(
                    "altered document hash {} verified against digest",
                    to_hex(&altered)
                )));
            }
        }
        if self.tamper_trials() > 0 {
            log::info!("Altered document hashes fail verification as expected.");
        }
        Ok(())
    }

    /// Verifies a journal block's hash against a ledger digest.
    ///
    /// With `self_check` on, both a corrupted digest and a corrupted block
    /// hash must then fail.
    ///
    /// # Errors
    ///
    /// * [`LVError::VerificationFailed`] if the proof does not reproduce the digest.
    /// * [`LVError::SelfCheckFailed`] if a corrupted input still verifies.
    /// * [`LVError::InvalidHashLength`] if the leaf hash is not exactly 32 bytes.
    /// * Input errors from the inclusion check.
    pub fn verify_block(
        &self,
        block_hash: &[u8],
        digest: &LedgerDigest,
        proof: &Proof,
    ) -> Result<()> {
        check_hash_length("blockHash", block_hash, false)?;
        log::info!(
            "Verifying block against digest with tip address {}",
            digest.tip_address
        );
        if !verify_block_hash(block_hash, digest, proof)? {
            log::error!("Block {} is not verified", to_hex(block_hash));
            return Err(LVError::VerificationFailed("block is not verified".to_string()));
        }
        log::info!("Success! The block is verified.");

        for _ in 0..self.tamper_trials() {
            let altered_digest = LedgerDigest::new(
                flip_one_bit(&digest.root_hash)?,
                digest.tip_address.clone(),
            );
            if verify_block_hash(block_hash, &altered_digest, proof)? {
                return Err(LVError::SelfCheckFailed(format!(
                    "block verified against altered digest {}",
                    to_hex(&altered_digest.root_hash)
                )));
            }

            let altered_block_hash = flip_one_bit(block_hash)?;
            if verify_block_hash(&altered_block_hash, digest, proof)? {
                return Err(LVError::SelfCheckFailed(format!(
                    "altered block hash {} verified against digest",
                    to_hex(&altered_block_hash)
                )));
            }
        }
        if self.tamper_trials() > 0 {
            log::info!("Altered digests and block hashes fail verification as expected.");
        }
        Ok(())
    }

    /// Validates already-read export data files, given as `(key, blocks)` in manifest order.
    ///
    /// Each file's blocks must match the range in its key; the concatenated
    /// blocks are then verified strand by strand.
    pub fn validate_chunks(
        &self,
        chunks: Vec<(String, Vec<JournalBlock>)>,
    ) -> Result<Vec<StrandSummary>> {
        let mut blocks = Vec::new();
        for (key, chunk) in chunks {
            check_key_range(&key, &chunk)?;
            blocks.extend(chunk);
        }
        self.validate_blocks(blocks)
    }

    /// Reads export `export_id` from `source` and validates its hash chains.
    pub fn validate_export<S: ExportSource + ?Sized>(
        &self,
        source: &S,
        prefix: &str,
        export_id: &str,
    ) -> Result<Vec<StrandSummary>> {
        log::info!("Validating hash chain for export {}", export_id);
        let blocks = read_export(source, prefix, export_id)?;
        let summaries = self.validate_blocks(blocks)?;
        log::info!("Hash chain validation for export {} is successful", export_id);
        Ok(summaries)
    }

    fn validate_blocks(&self, blocks: Vec<JournalBlock>) -> Result<Vec<StrandSummary>> {
        let count = blocks.len();
        verify_strands(blocks)
            .map(|summaries| {
                log::info!(
                    "Verified {} blocks across {} strand(s)",
                    count,
                    summaries.len()
                );
                summaries
            })
            .map_err(|e| {
                log::error!("Unable to perform hash chain verification: {}", e);
                e
            })
    }
}
