//! Fairness auditor errors

use thiserror::Error;

/// Errors from the fairness auditor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FairnessError {
    #[error("Cohort '{cohort}' has {scores} scores but {labels} labels")]
    LabelLengthMismatch {
        cohort: &'static str,
        scores: usize,
        labels: usize,
    },
}

/// Result type for fairness operations
pub type FairnessResult<T> = Result<T, FairnessError>;
