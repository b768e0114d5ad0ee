//! Floating point comparisons shared by the numeric modules.
//!
//! Every "is zero", "is positive" or "is optimal" decision in the solver goes
//! through these helpers with an explicit tolerance.

/// Tolerance used when the caller does not configure one
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// `value` is within `tolerance` of zero
///
/// ```
/// use lp_simplex::util::is_zero;
///
/// assert!(is_zero(1e-12, 1e-9));
/// assert!(!is_zero(-1e-3, 1e-9));
/// ```
pub fn is_zero(value: f64, tolerance: f64) -> bool {
    value.abs() <= tolerance
}

/// `value` is strictly greater than `tolerance`
pub fn is_positive(value: f64, tolerance: f64) -> bool {
    value > tolerance
}

/// `value` is strictly smaller than `-tolerance`
pub fn is_negative(value: f64, tolerance: f64) -> bool {
    value < -tolerance
}

/// Snap values that are numerically zero to an exact `0.0`.
///
/// Keeps `-0.0` and `1e-17` noise out of extracted solutions and reports.
pub fn clean(value: f64, tolerance: f64) -> f64 {
    if is_zero(value, tolerance) {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_tests_respect_tolerance() {
        assert!(!is_positive(1e-10, DEFAULT_TOLERANCE));
        assert!(is_positive(1e-8, DEFAULT_TOLERANCE));
        assert!(!is_negative(-1e-10, DEFAULT_TOLERANCE));
        assert!(is_negative(-1e-8, DEFAULT_TOLERANCE));
    }

    #[test]
    fn clean_removes_noise_and_negative_zero() {
        assert_eq!(clean(-1e-15, DEFAULT_TOLERANCE).to_bits(), 0.0f64.to_bits());
        assert_eq!(clean(-0.0, DEFAULT_TOLERANCE).to_bits(), 0.0f64.to_bits());
        assert_eq!(clean(2.5, DEFAULT_TOLERANCE), 2.5);
    }
}
