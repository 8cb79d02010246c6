//! FairScore Fairness Auditor
//!
//! Compares two cohorts of scores (one per value of a protected attribute)
//! at a shared decision threshold.
//!
//! ## Key Components
//!
//! - [`metrics`] - Statistical parity and equal opportunity differences
//! - [`threshold::threshold_shift`] - Single-step threshold correction
//! - [`audit::FairnessAuditor`] - Combines both into a pass/fail verdict
//!
//! Everything here is a pure function of its inputs.

pub mod audit;
pub mod error;
pub mod metrics;
pub mod threshold;

pub use audit::{FairnessAuditResult, FairnessAuditor, LabelledCohort};
pub use error::{FairnessError, FairnessResult};
pub use metrics::{approval_rate, equal_opportunity, statistical_parity, true_positive_rate};
pub use threshold::threshold_shift;
