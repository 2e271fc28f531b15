//! Guarded arithmetic shared by every formula in the crate.
//!
//! Laboratory logs routinely contain zero heights, empty stages and flat
//! pressure steps. Rather than aborting a batch, every division goes through
//! [`guarded_divide`], which substitutes [`DIVISION_FALLBACK`] whenever the
//! denominator is zero or the quotient would not be finite.
//!
//! [`Quotient`] exposes the same computation with the outcome kind attached, so
//! callers (and tests) can tell a computed zero from a suppressed one.

/// Value substituted when a division cannot produce a finite result.
pub const DIVISION_FALLBACK: f64 = 0.0;

/// Outcome of a guarded division.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quotient {
    /// The denominator was usable and the quotient is finite.
    Computed(f64),
    /// The division was suppressed; the fallback value applies.
    Fallback,
}

impl Quotient {
    /// Divide `numerator` by `denominator`, recording whether the guard fired.
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
            return Self::Fallback;
        }
        let q = numerator / denominator;
        if q.is_finite() {
            Self::Computed(q)
        } else {
            Self::Fallback
        }
    }

    /// The quotient, or [`DIVISION_FALLBACK`].
    #[inline]
    pub fn value(self) -> f64 {
        self.value_or(DIVISION_FALLBACK)
    }

    /// The quotient, or `default` when the guard fired.
    #[inline]
    pub fn value_or(self, default: f64) -> f64 {
        match self {
            Quotient::Computed(q) => q,
            Quotient::Fallback => default,
        }
    }

    /// Whether the guard substituted the fallback.
    pub fn is_fallback(self) -> bool {
        matches!(self, Quotient::Fallback)
    }
}

/// `numerator / denominator`, or [`DIVISION_FALLBACK`] when that is not finite.
#[inline]
pub fn guarded_divide(numerator: f64, denominator: f64) -> f64 {
    Quotient::of(numerator, denominator).value()
}

/// Replace a non-finite value with [`DIVISION_FALLBACK`].
#[inline]
pub fn finite_or_fallback(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        DIVISION_FALLBACK
    }
}

/// `asin(x)` in degrees with `x` clipped to `[-1, 1]`.
pub fn clipped_asin_degrees(x: f64) -> f64 {
    if x.is_nan() {
        return DIVISION_FALLBACK;
    }
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_denominator_uses_fallback() {
        assert_eq!(guarded_divide(5.0, 0.0), DIVISION_FALLBACK);
        assert_eq!(guarded_divide(-5.0, -0.0), DIVISION_FALLBACK);
        assert!(Quotient::of(1.0, 0.0).is_fallback());
    }

    #[test]
    fn test_non_finite_inputs_use_fallback() {
        assert_eq!(guarded_divide(1.0, f64::NAN), DIVISION_FALLBACK);
        assert_eq!(guarded_divide(f64::INFINITY, 2.0), DIVISION_FALLBACK);
        assert_eq!(guarded_divide(1.0, f64::INFINITY), DIVISION_FALLBACK);
        // overflow to infinity
        assert_eq!(guarded_divide(f64::MAX, 1e-300), DIVISION_FALLBACK);
    }

    #[test]
    fn test_computed_zero_is_not_a_fallback() {
        let q = Quotient::of(0.0, 4.0);
        assert_eq!(q, Quotient::Computed(0.0));
        assert!(!q.is_fallback());
        assert_eq!(Quotient::Fallback.value_or(-1.0), -1.0);
    }

    #[test]
    fn test_clipped_asin() {
        assert_eq!(clipped_asin_degrees(2.83), 90.0);
        assert_eq!(clipped_asin_degrees(-7.0), -90.0);
        assert!((clipped_asin_degrees(0.5) - 30.0).abs() < 1e-9);
        assert_eq!(clipped_asin_degrees(f64::NAN), DIVISION_FALLBACK);
    }

    proptest! {
        #[test]
        fn prop_zero_denominator_yields_default(x in -1.0e12f64..1.0e12) {
            prop_assert_eq!(guarded_divide(x, 0.0), DIVISION_FALLBACK);
        }

        #[test]
        fn prop_nonzero_denominator_divides(x in -1.0e6f64..1.0e6, y in 1.0e-3f64..1.0e6) {
            prop_assert_eq!(guarded_divide(x, y), x / y);
            prop_assert_eq!(guarded_divide(x, -y), x / -y);
        }
    }
}
