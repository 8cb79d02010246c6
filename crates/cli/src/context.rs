//! Application context - wires everything together

use crate::publisher::{AuditPublisher, DEFAULT_BUFFER};
use fairscore_ledger::{FileStore, LedgerConfig, LedgerError, LedgerWriter};
use fairscore_scoring::ScoringEngine;
use std::path::{Path, PathBuf};

/// Application context - shared by every command
#[derive(Debug)]
pub struct AppContext {
    pub engine: ScoringEngine,
    data_path: PathBuf,
    ledger_config: Option<LedgerConfig>,
}

impl AppContext {
    /// Create a context over `data_path` with an explicit ledger configuration
    pub fn new(
        data_path: impl AsRef<Path>,
        ledger_config: Option<LedgerConfig>,
    ) -> Result<Self, ContextError> {
        let data_path = data_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_path).map_err(LedgerError::from)?;

        Ok(Self {
            engine: ScoringEngine::new(),
            data_path,
            ledger_config,
        })
    }

    /// Create a context, taking the ledger configuration from a JSON file
    /// if given, else from the environment.
    ///
    /// Commands that never touch the ledger work without any configuration.
    pub fn load(
        data_path: impl AsRef<Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ContextError> {
        let ledger_config = match config_file {
            Some(path) => Some(LedgerConfig::from_file(path)?),
            None => match LedgerConfig::from_env() {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::debug!(reason = %e, "Ledger not configured from environment");
                    None
                }
            },
        };

        Self::new(data_path, ledger_config)
    }

    /// Data directory
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Ledger configuration, required by publish and verify
    pub fn ledger_config(&self) -> Result<&LedgerConfig, ContextError> {
        self.ledger_config
            .as_ref()
            .ok_or(ContextError::LedgerNotConfigured)
    }

    /// Chain file location
    pub fn chain_path(&self) -> Result<PathBuf, ContextError> {
        Ok(self.ledger_config()?.chain_path(&self.data_path))
    }

    /// Open the ledger for reading or a one-off append
    pub fn open_ledger(&self) -> Result<LedgerWriter<FileStore>, ContextError> {
        Ok(LedgerWriter::open(&self.data_path, self.ledger_config()?)?)
    }

    /// Spawn the single ledger writer task
    pub fn spawn_publisher(&self) -> Result<AuditPublisher, ContextError> {
        let writer = self.open_ledger()?;
        tracing::info!(
            chain = %self.chain_path()?.display(),
            encrypted = writer.is_encrypted(),
            "Audit publisher ready"
        );
        Ok(AuditPublisher::spawn(writer, DEFAULT_BUFFER))
    }
}

/// Errors while building the context
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Ledger is not configured: set FAIRSCORE_LEDGER_SALT or pass --config")]
    LedgerNotConfigured,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
