//! Explicit rounding for percentages and grade points.
//!
//! Every percentage and GPA the API returns goes through [`round_2dp`] so the
//! behavior is uniform and testable, instead of ad-hoc formatting at each
//! call site.

/// Round to two decimal places, half away from zero.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_2dp() {
        assert_eq!(round_2dp(66.666666), 66.67);
        assert_eq!(round_2dp(50.0), 50.0);
        assert_eq!(round_2dp(0.005), 0.01);
        assert_eq!(round_2dp(99.994), 99.99);
        assert_eq!(round_2dp(0.0), 0.0);
    }

    #[test]
    fn test_round_2dp_negative() {
        // 0.125 is exact in binary, so the half-away-from-zero case is stable
        assert_eq!(round_2dp(-0.125), -0.13);
    }
}
