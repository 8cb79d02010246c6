//! FairScore CLI - Pipeline orchestrator
//!
//! Wires the feature extractor, scoring engine, fairness auditor and audit
//! ledger behind the `fairscore` binary.

pub mod commands;
pub mod context;
pub mod publisher;

pub use context::{AppContext, ContextError};
pub use publisher::{AuditPublisher, PublishError};
