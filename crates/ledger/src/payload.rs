//! Audit payload - What a published audit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload format version
pub const PAYLOAD_VERSION: &str = "0.1";

/// One audit decision as stored in the ledger.
///
/// Field names on the wire are short (`k`, `delta`, `recommended_k`) so that
/// existing chain files keep hashing the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditPayload {
    pub version: String,
    #[serde(rename = "k")]
    pub threshold: i32,
    pub spd: f64,
    pub eo: f64,
    #[serde(rename = "delta")]
    pub tolerance: f64,
    #[serde(rename = "recommended_k")]
    pub recommended_threshold: i32,
    pub passed: bool,
    pub timestamp: DateTime<Utc>,
}

impl AuditPayload {
    /// New payload stamped with the current time
    pub fn new(
        threshold: i32,
        spd: f64,
        eo: f64,
        tolerance: f64,
        recommended_threshold: i32,
        passed: bool,
    ) -> Self {
        Self {
            version: PAYLOAD_VERSION.to_string(),
            threshold,
            spd,
            eo,
            tolerance,
            recommended_threshold,
            passed,
            timestamp: Utc::now(),
        }
    }

    /// Replace the timestamp (replays, fixtures)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
