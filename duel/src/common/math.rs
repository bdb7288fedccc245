/// Rounds to the nearest integer, rounding exact halves down.
///
/// Negative and non-finite values round to 0.
pub fn gf_round(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let floor = value.floor();
    let rounded = if value - floor > 0.5 { floor + 1.0 } else { floor };
    rounded.min(u32::MAX as f64) as u32
}

/// Returns `percent`% of `value`, truncated.
pub fn modify_by_percent(value: u32, percent: u32) -> u32 {
    ((value as u64 * percent as u64) / 100) as u32
}

#[cfg(test)]
mod math_test {
    use crate::common::{
        gf_round,
        modify_by_percent,
    };

    #[test]
    fn rounds_halves_down() {
        assert_eq!(gf_round(1.5), 1);
        assert_eq!(gf_round(1.51), 2);
        assert_eq!(gf_round(2.49), 2);
        assert_eq!(gf_round(0.0), 0);
        assert_eq!(gf_round(-3.7), 0);
        assert_eq!(gf_round(f64::NAN), 0);
    }

    #[test]
    fn truncates_percentages() {
        assert_eq!(modify_by_percent(73, 85), 62);
        assert_eq!(modify_by_percent(100, 33), 33);
    }
}
