//! Fairness audit - metrics, verdict and recommendation in one call

use crate::error::FairnessResult;
use crate::metrics::{equal_opportunity, statistical_parity};
use crate::threshold::threshold_shift;
use fairscore_core::round_dp;
use serde::{Deserialize, Serialize};

/// Decision threshold used when the caller does not pick one
pub const DEFAULT_THRESHOLD: i32 = 650;

/// Maximum tolerated absolute disparity when the caller does not pick one
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Scores of one cohort with their ground-truth outcomes
#[derive(Debug, Clone, Copy)]
pub struct LabelledCohort<'a> {
    pub scores: &'a [f64],
    pub labels: &'a [bool],
}

impl<'a> LabelledCohort<'a> {
    pub fn new(scores: &'a [f64], labels: &'a [bool]) -> Self {
        Self { scores, labels }
    }
}

/// Audit verdict.
///
/// `spd` and `eo` are rounded to 4 decimals for presentation; `passed` and
/// `recommended_threshold` are computed from the unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessAuditResult {
    pub spd: f64,
    pub eo: f64,
    pub threshold: i32,
    pub tolerance: f64,
    pub recommended_threshold: i32,
    pub passed: bool,
}

/// Fairness Auditor
///
/// Holds the decision threshold and tolerance; has no other state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairnessAuditor {
    threshold: i32,
    tolerance: f64,
}

impl FairnessAuditor {
    /// Create an auditor for the given threshold and tolerance
    pub fn new(threshold: i32, tolerance: f64) -> Self {
        Self {
            threshold,
            tolerance,
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Audit two cohorts where every applicant is treated as qualified.
    ///
    /// With all labels positive, equal opportunity reduces to the approval
    /// rate gap. This call cannot fail.
    pub fn audit(&self, protected: &[f64], reference: &[f64]) -> FairnessAuditResult {
        let spd = statistical_parity(protected, reference, self.threshold);
        let eo = spd;
        self.verdict(spd, eo)
    }

    /// Audit two cohorts with caller-supplied ground-truth labels.
    ///
    /// Rejects the request if a cohort's labels do not line up with its
    /// scores.
    pub fn audit_labelled(
        &self,
        protected: LabelledCohort<'_>,
        reference: LabelledCohort<'_>,
    ) -> FairnessResult<FairnessAuditResult> {
        let spd = statistical_parity(protected.scores, reference.scores, self.threshold);
        let eo = equal_opportunity(
            protected.scores,
            protected.labels,
            reference.scores,
            reference.labels,
            self.threshold,
        )?;
        Ok(self.verdict(spd, eo))
    }

    fn verdict(&self, spd: f64, eo: f64) -> FairnessAuditResult {
        let passed = spd.abs() <= self.tolerance && eo.abs() <= self.tolerance;
        let recommended_threshold = threshold_shift(spd, eo, self.threshold, self.tolerance);

        if passed {
            tracing::debug!(spd, eo, threshold = self.threshold, "Fairness audit passed");
        } else {
            tracing::info!(
                spd,
                eo,
                threshold = self.threshold,
                recommended_threshold,
                "Fairness audit failed"
            );
        }

        FairnessAuditResult {
            spd: round_dp(spd, 4),
            eo: round_dp(eo, 4),
            threshold: self.threshold,
            tolerance: self.tolerance,
            recommended_threshold,
            passed,
        }
    }
}

impl Default for FairnessAuditor {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FairnessError;

    #[test]
    fn test_balanced_cohorts_pass() {
        let protected = [720.0, 680.0, 690.0, 710.0, 700.0];
        let reference = [680.0, 720.0, 690.0, 700.0, 710.0];

        let result = FairnessAuditor::new(650, 0.05).audit(&protected, &reference);

        assert_eq!(result.spd, 0.0);
        assert_eq!(result.eo, 0.0);
        assert!(result.passed);
        assert_eq!(result.threshold, 650);
        assert_eq!(result.recommended_threshold, 650);
    }

    #[test]
    fn test_under_approved_cohort_fails_and_lowers_threshold() {
        let protected = [700.0, 600.0, 600.0, 600.0];
        let reference = [700.0, 700.0, 700.0, 600.0];

        let result = FairnessAuditor::new(650, 0.05).audit(&protected, &reference);

        assert_eq!(result.spd, -0.5);
        assert!(!result.passed);
        assert_eq!(result.recommended_threshold, 620);
    }

    #[test]
    fn test_boundary_passes() {
        // protected 1/2, reference 2/2 -> spd = eo = -0.5
        let result = FairnessAuditor::new(650, 0.5).audit(&[700.0, 500.0], &[700.0, 700.0]);
        assert_eq!(result.spd, -0.5);
        assert_eq!(result.eo, -0.5);
        assert!(result.passed);
        assert_eq!(result.recommended_threshold, 650);
    }

    #[test]
    fn test_verdict_independent_of_recommendation() {
        // the recommendation is clamped into range, the verdict still
        // reports the original threshold
        let result = FairnessAuditor::new(750, 0.05).audit(&[800.0], &[700.0]);
        assert!(!result.passed);
        assert_eq!(result.threshold, 750);
        assert_eq!(result.recommended_threshold, 720);
    }

    #[test]
    fn test_labelled_audit() {
        let protected_scores = [700.0, 600.0, 700.0];
        let protected_labels = [true, true, false];
        let reference_scores = [700.0, 700.0, 600.0];
        let reference_labels = [true, true, false];

        let result = FairnessAuditor::default()
            .audit_labelled(
                LabelledCohort::new(&protected_scores, &protected_labels),
                LabelledCohort::new(&reference_scores, &reference_labels),
            )
            .unwrap();

        // spd = 2/3 - 2/3, eo = 1/2 - 2/2
        assert_eq!(result.spd, 0.0);
        assert_eq!(result.eo, -0.5);
        assert!(!result.passed);
        // spd is not negative, so the shift goes up
        assert_eq!(result.recommended_threshold, 680);
    }

    #[test]
    fn test_labelled_audit_rejects_mismatch() {
        let result = FairnessAuditor::default().audit_labelled(
            LabelledCohort::new(&[700.0, 710.0], &[true]),
            LabelledCohort::new(&[700.0], &[true]),
        );
        assert!(matches!(
            result,
            Err(FairnessError::LabelLengthMismatch { cohort: "protected", .. })
        ));
    }

    #[test]
    fn test_rounding_for_presentation() {
        // 1/3 - 0 = 0.3333...
        let result = FairnessAuditor::default().audit(&[700.0, 600.0, 600.0], &[600.0]);
        assert_eq!(result.spd, 0.3333);
        assert_eq!(result.eo, 0.3333);
    }

    #[test]
    fn test_result_serializes() {
        let result = FairnessAuditor::default().audit(&[700.0], &[700.0]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["threshold"], 650);
        assert_eq!(json["recommended_threshold"], 650);
        assert_eq!(json["passed"], true);
    }
}
