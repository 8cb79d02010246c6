//! Ledger writer - The only way records get into the chain
//!
//! Reading the tail and appending after it happen under one lock, so two
//! publishes sharing a writer can never claim the same chain position.
//! Separate processes writing the same file are not coordinated here.

use crate::canonical::canonicalize;
use crate::cipher::PayloadCipher;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::hash::{block_hash, payload_hash, verify_chain, GENESIS_HASH};
use crate::record::LedgerRecord;
use crate::store::{FileStore, LedgerStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// What the caller gets back from a successful append
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendReceipt {
    pub block_hash: String,
    pub payload_hash: String,
}

/// Appends audit payloads to a hash-chained store
#[derive(Debug)]
pub struct LedgerWriter<S: LedgerStore> {
    store: Mutex<S>,
    cipher: PayloadCipher,
    salt: String,
}

impl<S: LedgerStore> LedgerWriter<S> {
    pub fn new(store: S, cipher: PayloadCipher, salt: impl Into<String>) -> LedgerResult<Self> {
        let salt = salt.into();
        if salt.is_empty() {
            return Err(LedgerError::Config("salt must not be empty".to_string()));
        }

        Ok(Self {
            store: Mutex::new(store),
            cipher,
            salt,
        })
    }

    /// Writer over `store` using the key and salt from `config`
    pub fn from_config(store: S, config: &LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        let cipher = PayloadCipher::from_key(config.encryption_key.as_deref())?;
        Self::new(store, cipher, config.salt.clone())
    }

    /// True if payloads are encrypted at rest
    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_encrypted()
    }

    /// Append one payload after the current tail
    pub fn append<T: Serialize + ?Sized>(&self, payload: &T) -> LedgerResult<AppendReceipt> {
        // Pure steps first, outside the critical section
        let canonical = canonicalize(payload)?;
        let payload_hash = payload_hash(&canonical);
        let payload_cipher = self.cipher.seal(&canonical)?;

        let mut store = self.lock()?;

        let prev_hash = match store.read_tail()? {
            Some(tail) => tail.block_hash,
            None => GENESIS_HASH.to_string(),
        };

        let record = LedgerRecord {
            block_hash: block_hash(&prev_hash, &payload_cipher, &self.salt),
            prev_hash,
            payload_cipher,
            payload_hash,
        };

        store.append(&record)?;
        drop(store);

        tracing::info!(
            block_hash = %record.block_hash,
            prev_hash = %record.prev_hash,
            encrypted = self.cipher.is_encrypted(),
            "Appended ledger record"
        );

        Ok(AppendReceipt {
            block_hash: record.block_hash,
            payload_hash: record.payload_hash,
        })
    }

    /// Every record, oldest first
    pub fn records(&self) -> LedgerResult<Vec<LedgerRecord>> {
        self.lock()?.read_all()
    }

    /// Check linkage and block hashes from genesis; returns the record count
    pub fn verify(&self) -> LedgerResult<usize> {
        let records = self.records()?;
        verify_chain(&records, &self.salt)?;

        tracing::debug!(records = records.len(), "Ledger chain verified");
        Ok(records.len())
    }

    /// Recover a record's payload and check it against `payload_hash`
    pub fn open_payload(&self, record: &LedgerRecord) -> LedgerResult<Value> {
        let canonical = self.cipher.open(&record.payload_cipher)?;

        let computed = payload_hash(&canonical);
        if computed != record.payload_hash {
            return Err(LedgerError::PayloadHashMismatch {
                recorded: record.payload_hash.clone(),
                computed,
            });
        }

        Ok(serde_json::from_str(&canonical)?)
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, S>> {
        self.store.lock().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl LedgerWriter<FileStore> {
    /// Writer over the configured chain file inside `data_dir`
    pub fn open(data_dir: &Path, config: &LedgerConfig) -> LedgerResult<Self> {
        let store = FileStore::new(config.chain_path(data_dir))?;
        Self::from_config(store, config)
    }

    /// Path of the underlying chain file
    pub fn path(&self) -> LedgerResult<std::path::PathBuf> {
        Ok(self.lock()?.path().to_path_buf())
    }
}
