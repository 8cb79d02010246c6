//! FairScore Ledger - Tamper-evident log of published audits
//!
//! Every published audit becomes one JSON line:
//!
//! ```text
//! { prev_hash, payload_cipher, payload_hash, block_hash }
//!        │                                      │
//!        └──────── = block_hash of the line above
//! ```
//!
//! `block_hash = sha256(prev_hash || payload_cipher || salt)`, so editing or
//! removing any line breaks every link after it.
//!
//! # Key Types
//! - `LedgerWriter`: Canonicalize → hash → encrypt → link → append
//! - `LedgerStore`: Where records live (`FileStore`, `MemoryStore`)
//! - `PayloadCipher`: Optional encryption at rest
//! - `LedgerConfig`: Salt, key and chain file location

pub mod canonical;
pub mod cipher;
pub mod config;
pub mod error;
pub mod hash;
pub mod payload;
pub mod record;
pub mod store;
pub mod writer;

pub use canonical::{canonical_json, canonicalize};
pub use cipher::PayloadCipher;
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use hash::{verify_chain, GENESIS_HASH};
pub use payload::AuditPayload;
pub use record::LedgerRecord;
pub use store::{FileStore, LedgerStore, MemoryStore};
pub use writer::{AppendReceipt, LedgerWriter};
