//! Ledger configuration
//!
//! The salt and the optional encryption key come from the hosting
//! environment; neither has a built-in value.

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the block-hash salt
pub const ENV_SALT: &str = "FAIRSCORE_LEDGER_SALT";

/// Environment variable holding the base64 encryption key (empty = none)
pub const ENV_KEY: &str = "FAIRSCORE_LEDGER_KEY";

/// Environment variable overriding the chain file location
pub const ENV_CHAIN_FILE: &str = "FAIRSCORE_CHAIN_FILE";

/// Configuration for the Ledger Writer
#[derive(Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Mixed into every block hash. Distinct from the encryption key.
    pub salt: String,

    /// Base64 256-bit key. Absent means payloads are stored in plaintext.
    #[serde(default)]
    pub encryption_key: Option<String>,

    /// Chain file, relative paths resolve against the data directory
    #[serde(default = "default_chain_file")]
    pub chain_file: PathBuf,
}

fn default_chain_file() -> PathBuf {
    PathBuf::from("audit_chain.jsonl")
}

impl LedgerConfig {
    /// Plaintext ledger with the given salt
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            encryption_key: None,
            chain_file: default_chain_file(),
        }
    }

    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_key = Some(key.into());
        self
    }

    pub fn with_chain_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.chain_file = path.into();
        self
    }

    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> LedgerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> LedgerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LedgerResult<Self> {
        let salt = lookup(ENV_SALT)
            .ok_or_else(|| LedgerError::Config(format!("{} is not set", ENV_SALT)))?;

        let mut config = Self::new(salt);
        config.encryption_key = lookup(ENV_KEY).filter(|k| !k.trim().is_empty());
        if let Some(path) = lookup(ENV_CHAIN_FILE).filter(|p| !p.trim().is_empty()) {
            config.chain_file = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the writer cannot use
    pub fn validate(&self) -> LedgerResult<()> {
        if self.salt.is_empty() {
            return Err(LedgerError::Config("salt must not be empty".to_string()));
        }
        Ok(())
    }

    /// Chain file location for a given data directory
    pub fn chain_path(&self, data_dir: &Path) -> PathBuf {
        if self.chain_file.is_absolute() {
            self.chain_file.clone()
        } else {
            data_dir.join(&self.chain_file)
        }
    }
}

impl fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("salt", &"<redacted>")
            .field("encryption_key", &self.encryption_key.as_ref().map(|_| "<redacted>"))
            .field("chain_file", &self.chain_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_plaintext() {
        let config = LedgerConfig::from_lookup(lookup(&[(ENV_SALT, "pepper")])).unwrap();

        assert_eq!(config.salt, "pepper");
        assert!(config.encryption_key.is_none());
        assert_eq!(config.chain_file, PathBuf::from("audit_chain.jsonl"));
    }

    #[test]
    fn test_empty_key_means_plaintext() {
        let config =
            LedgerConfig::from_lookup(lookup(&[(ENV_SALT, "pepper"), (ENV_KEY, "")])).unwrap();
        assert!(config.encryption_key.is_none());
    }

    #[test]
    fn test_from_lookup_full() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_SALT, "pepper"),
            (ENV_KEY, "a2V5"),
            (ENV_CHAIN_FILE, "/var/lib/fairscore/chain.jsonl"),
        ]))
        .unwrap();

        assert_eq!(config.encryption_key.as_deref(), Some("a2V5"));
        assert_eq!(config.chain_file, PathBuf::from("/var/lib/fairscore/chain.jsonl"));
    }

    #[test]
    fn test_missing_salt_rejected() {
        let result = LedgerConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(LedgerError::Config(_))));

        let result = LedgerConfig::from_lookup(lookup(&[(ENV_SALT, "")]));
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_config_partial_json() {
        // Should use defaults for missing fields
        let config: LedgerConfig = serde_json::from_str(r#"{ "salt": "pepper" }"#).unwrap();
        assert!(config.encryption_key.is_none());
        assert_eq!(config.chain_file, PathBuf::from("audit_chain.jsonl"));
    }

    #[test]
    fn test_chain_path_resolution() {
        let data = Path::new("/data");
        let relative = LedgerConfig::new("s");
        assert_eq!(relative.chain_path(data), PathBuf::from("/data/audit_chain.jsonl"));

        let absolute = LedgerConfig::new("s").with_chain_file("/tmp/chain.jsonl");
        assert_eq!(absolute.chain_path(data), PathBuf::from("/tmp/chain.jsonl"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = LedgerConfig::new("pepper").with_encryption_key("a2V5");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pepper"));
        assert!(!debug.contains("a2V5"));
    }
}
