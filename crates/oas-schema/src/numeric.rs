//! Exact numeric comparison for number keywords.
//!
//! JSON numbers and schema bounds are lifted into [`Numeric`]. Values whose
//! shortest decimal form fits in a 96-bit `rust_decimal::Decimal` compare
//! and divide exactly, so `0.3` is a multiple of `0.1`. Anything outside
//! that range falls back to `f64` arithmetic.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Number;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Exact(Decimal),
    Approx(f64),
}

impl Numeric {
    pub(crate) fn from_json(number: &Number) -> Self {
        if let Some(i) = number.as_i64() {
            Self::Exact(Decimal::from(i))
        } else if let Some(u) = number.as_u64() {
            Self::Exact(Decimal::from(u))
        } else {
            Self::from_f64(number.as_f64().unwrap_or(f64::NAN))
        }
    }

    pub(crate) fn from_f64(value: f64) -> Self {
        decimal_from_f64(value).map_or(Self::Approx(value), Self::Exact)
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Exact(d) => d.to_f64().unwrap_or(f64::NAN),
            Self::Approx(f) => f,
        }
    }

    pub(crate) fn is_integral(self) -> bool {
        match self {
            Self::Exact(d) => d.fract().is_zero(),
            Self::Approx(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    /// Whether `self` divided by `divisor` leaves no remainder.
    pub(crate) fn is_multiple_of(self, divisor: Numeric) -> bool {
        if let (Self::Exact(value), Self::Exact(divisor)) = (self, divisor) {
            if let Some(remainder) = value.checked_rem(divisor) {
                return remainder.is_zero();
            }
        }
        let quotient = self.to_f64() / divisor.to_f64();
        quotient.is_finite() && quotient.fract() == 0.0
    }

    pub(crate) fn compare(self, other: Numeric) -> Option<Ordering> {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

/// Parse the shortest round-trip decimal form of `value`.
///
/// `f64`'s `Display` never uses exponent notation, so the text is a plain
/// decimal literal. Literals that need more than 28 fractional digits or a
/// mantissa wider than 96 bits are rejected rather than rounded.
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str_exact(&value.to_string()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn num(v: serde_json::Value) -> Numeric {
        Numeric::from_json(v.as_number().unwrap())
    }

    #[test]
    fn decimal_fractions_are_exact() {
        assert!(num(serde_json::json!(0.3)).is_multiple_of(Numeric::from_f64(0.1)));
        assert!(num(serde_json::json!(19.99)).is_multiple_of(Numeric::from_f64(0.01)));
        assert!(!num(serde_json::json!(0.35)).is_multiple_of(Numeric::from_f64(0.1)));
    }

    #[test]
    fn integers_and_floats_compare_by_value() {
        assert_eq!(
            num(serde_json::json!(10)).compare(num(serde_json::json!(10.0))),
            Some(Ordering::Equal)
        );
        assert_eq!(
            num(serde_json::json!(9.999)).compare(Numeric::from_f64(10.0)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn huge_values_fall_back_to_floats() {
        assert!(matches!(Numeric::from_f64(1e300), Numeric::Approx(_)));
        assert!(matches!(Numeric::from_f64(1e-40), Numeric::Approx(_)));
        let big = Numeric::from_f64(2f64.powi(1000));
        assert!(big.is_multiple_of(Numeric::from_f64(2f64.powi(999))));
        assert!(!Numeric::from_f64(2f64.powi(999)).is_multiple_of(big));
        assert_eq!(
            Numeric::from_f64(1e300).compare(Numeric::from_f64(5.0)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn integral_check() {
        assert!(num(serde_json::json!(4)).is_integral());
        assert!(num(serde_json::json!(4.0)).is_integral());
        assert!(!num(serde_json::json!(4.5)).is_integral());
        assert!(Numeric::from_f64(1e300).is_integral());
    }

    proptest! {
        /// For integer values the exact check agrees with integer remainder.
        #[test]
        fn multiple_of_matches_integer_remainder(v in -1_000_000i64..1_000_000, m in 1i64..1_000) {
            let value = Numeric::Exact(Decimal::from(v));
            prop_assert_eq!(value.is_multiple_of(Numeric::from_f64(m as f64)), v % m == 0);
        }

        /// Cents are always multiples of 0.01.
        #[test]
        fn cents_are_multiples_of_a_hundredth(cents in -10_000_000i64..10_000_000) {
            let value = Numeric::from_f64(cents as f64 / 100.0);
            prop_assert!(value.is_multiple_of(Numeric::from_f64(0.01)));
        }
    }
}
