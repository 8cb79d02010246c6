//! Ledger errors

use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The last record could not be read, so the chain position is unknown.
    /// Never resolved by starting over from genesis.
    #[error("Chain integrity unknown: last record (line {line}) is unreadable: {reason}")]
    CorruptTail { line: usize, reason: String },

    #[error("Corrupt record at line {line}: {reason}")]
    CorruptRecord { line: usize, reason: String },

    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Broken hash chain at record {index}: expected prev_hash {expected}, got {actual}")]
    BrokenLink {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Invalid block hash at record {index}: expected {expected}, got {actual}")]
    InvalidBlockHash {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Payload hash mismatch: recorded {recorded}, computed {computed}")]
    PayloadHashMismatch { recorded: String, computed: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ledger writer lock poisoned")]
    LockPoisoned,
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
