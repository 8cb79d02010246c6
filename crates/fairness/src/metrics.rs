//! Group disparity metrics
//!
//! Both metrics are "protected minus reference", so a negative value means
//! the protected cohort is approved less often.

use crate::error::{FairnessError, FairnessResult};

/// Share of scores at or above `threshold`. An empty cohort has rate 0.0.
pub fn approval_rate(scores: &[f64], threshold: i32) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let k = f64::from(threshold);
    let approved = scores.iter().filter(|s| **s >= k).count();
    approved as f64 / scores.len() as f64
}

/// Statistical parity difference: `P(protected >= k) - P(reference >= k)`.
pub fn statistical_parity(protected: &[f64], reference: &[f64], threshold: i32) -> f64 {
    approval_rate(protected, threshold) - approval_rate(reference, threshold)
}

/// True-positive rate: approved positives over all positives (at least 1).
///
/// `labels[i]` is the ground truth for `scores[i]`.
pub fn true_positive_rate(
    cohort: &'static str,
    scores: &[f64],
    labels: &[bool],
    threshold: i32,
) -> FairnessResult<f64> {
    if scores.len() != labels.len() {
        return Err(FairnessError::LabelLengthMismatch {
            cohort,
            scores: scores.len(),
            labels: labels.len(),
        });
    }

    let k = f64::from(threshold);
    let positives = labels.iter().filter(|l| **l).count();
    let approved_positives = scores
        .iter()
        .zip(labels)
        .filter(|(score, label)| **label && **score >= k)
        .count();

    Ok(approved_positives as f64 / positives.max(1) as f64)
}

/// Equal opportunity difference: `TPR(protected) - TPR(reference)`.
pub fn equal_opportunity(
    protected_scores: &[f64],
    protected_labels: &[bool],
    reference_scores: &[f64],
    reference_labels: &[bool],
    threshold: i32,
) -> FairnessResult<f64> {
    let tpr_protected = true_positive_rate("protected", protected_scores, protected_labels, threshold)?;
    let tpr_reference = true_positive_rate("reference", reference_scores, reference_labels, threshold)?;
    Ok(tpr_protected - tpr_reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_rate_inclusive() {
        assert_eq!(approval_rate(&[650.0, 649.9, 700.0, 500.0], 650), 0.5);
    }

    #[test]
    fn test_empty_cohort_rate_is_zero() {
        assert_eq!(approval_rate(&[], 650), 0.0);
        assert_eq!(statistical_parity(&[], &[700.0], 650), -1.0);
        assert_eq!(statistical_parity(&[700.0], &[], 650), 1.0);
    }

    #[test]
    fn test_statistical_parity_equal_cohorts() {
        let protected = [720.0, 680.0, 690.0, 710.0, 700.0];
        let reference = [680.0, 720.0, 690.0, 700.0, 710.0];
        assert_eq!(statistical_parity(&protected, &reference, 650), 0.0);
    }

    #[test]
    fn test_statistical_parity_sign() {
        // protected: 1/4 approved, reference: 3/4 approved
        let protected = [700.0, 600.0, 600.0, 600.0];
        let reference = [700.0, 700.0, 700.0, 600.0];
        assert_eq!(statistical_parity(&protected, &reference, 650), -0.5);
    }

    #[test]
    fn test_true_positive_rate_ignores_negatives() {
        let scores = [700.0, 600.0, 700.0, 600.0];
        let labels = [true, true, false, false];
        assert_eq!(true_positive_rate("protected", &scores, &labels, 650).unwrap(), 0.5);
    }

    #[test]
    fn test_true_positive_rate_no_positives() {
        let scores = [700.0, 700.0];
        let labels = [false, false];
        assert_eq!(true_positive_rate("protected", &scores, &labels, 650).unwrap(), 0.0);
    }

    #[test]
    fn test_label_length_mismatch() {
        let result = equal_opportunity(&[700.0], &[true], &[700.0, 600.0], &[true], 650);
        assert_eq!(
            result,
            Err(FairnessError::LabelLengthMismatch {
                cohort: "reference",
                scores: 2,
                labels: 1,
            })
        );
    }

    #[test]
    fn test_metric_bounds() {
        let all = [900.0; 3];
        let none = [300.0; 3];
        let labels = [true; 3];
        assert_eq!(statistical_parity(&all, &none, 650), 1.0);
        assert_eq!(statistical_parity(&none, &all, 650), -1.0);
        assert_eq!(equal_opportunity(&none, &labels, &all, &labels, 650).unwrap(), -1.0);
    }
}
