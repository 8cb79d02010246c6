//! Decimal-place rounding for reported scalars

/// Round to `dp` decimal places, halves away from zero.
///
/// Every reported feature, score, rate and metric goes through this one
/// helper so the same input always rounds the same way.
pub fn round_dp(value: f64, dp: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halves_away_from_zero() {
        assert_eq!(round_dp(2.5, 0), 3.0);
        assert_eq!(round_dp(-2.5, 0), -3.0);
        assert_eq!(round_dp(0.25, 1), 0.3);
        assert_eq!(round_dp(0.125, 2), 0.13);
    }

    #[test]
    fn test_places() {
        assert_eq!(round_dp(821.25, 1), 821.3);
        assert_eq!(round_dp(0.83333, 2), 0.83);
        assert_eq!(round_dp(-0.123456, 4), -0.1235);
        assert_eq!(round_dp(0.6, 3), 0.6);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }
}
