//! Threshold correction
//!
//! A single-step heuristic: when either disparity exceeds the tolerance the
//! threshold moves one fixed step in the direction that narrows the approval
//! gap. It does not search for an optimal fair threshold.

/// Size of one correction step
pub const SHIFT_STEP: i32 = 30;

/// Recommended thresholds never leave `[MIN_THRESHOLD, MAX_THRESHOLD]`
pub const MIN_THRESHOLD: i32 = 580;
pub const MAX_THRESHOLD: i32 = 720;

/// Recommend a decision threshold.
///
/// Returns `threshold` unchanged when `|spd| <= tolerance` and
/// `|eo| <= tolerance`. Otherwise lowers it by [`SHIFT_STEP`] if the
/// protected cohort is under-approved (`spd < 0`) and raises it otherwise,
/// clamped to `[580, 720]`.
pub fn threshold_shift(spd: f64, eo: f64, threshold: i32, tolerance: f64) -> i32 {
    if spd.abs() > tolerance || eo.abs() > tolerance {
        let step = if spd < 0.0 { -SHIFT_STEP } else { SHIFT_STEP };
        threshold
            .saturating_add(step)
            .clamp(MIN_THRESHOLD, MAX_THRESHOLD)
    } else {
        threshold
    }
}
