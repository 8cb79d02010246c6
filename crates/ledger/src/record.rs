//! Ledger record - One line of the chain file

use serde::{Deserialize, Serialize};

/// One published audit.
///
/// Written once, never mutated. All hashes are `0x` + 64 lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// `block_hash` of the previous record, or the genesis hash
    pub prev_hash: String,
    /// Canonical payload, encrypted when a key is configured
    pub payload_cipher: String,
    /// Digest of the canonical (plaintext) payload
    pub payload_hash: String,
    /// Digest of `prev_hash || payload_cipher || salt`
    pub block_hash: String,
}
