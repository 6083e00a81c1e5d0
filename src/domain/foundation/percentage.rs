//! Percentage value object (share of a total, 0-100 scale).

use serde::{Serialize, Serializer};
use std::fmt;

/// A share of a grand total expressed on a 0-100 scale.
///
/// Built only through [`Percentage::of`], which guards against a zero or
/// non-finite base so the value is never NaN or infinite. A share of a zero
/// total displays as `0%`; every other share displays with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(Option<f64>);

impl Percentage {
    /// Share of an empty (zero) total.
    pub const NO_BASE: Self = Self(None);

    /// Computes `part / whole * 100`.
    pub fn of(part: f64, whole: f64) -> Self {
        if whole == 0.0 || !whole.is_finite() || !part.is_finite() {
            return Self::NO_BASE;
        }
        Self(Some(part / whole * 100.0))
    }

    /// Returns the numeric share (0.0 when the base was zero).
    pub fn value(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    /// Returns true if the total this share was taken from was zero.
    pub fn has_no_base(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::NO_BASE
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.2}%", value),
            None => write!(f, "0%"),
        }
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_formats_two_decimals() {
        assert_eq!(Percentage::of(20.0, 25.0).to_string(), "80.00%");
        assert_eq!(Percentage::of(1.0, 3.0).to_string(), "33.33%");
        assert_eq!(Percentage::of(0.0, 3.0).to_string(), "0.00%");
    }

    #[test]
    fn percentage_of_zero_total_is_bare_zero() {
        let pct = Percentage::of(0.0, 0.0);
        assert!(pct.has_no_base());
        assert_eq!(pct.to_string(), "0%");
        assert_eq!(pct.value(), 0.0);
    }

    #[test]
    fn percentage_never_produces_nan_or_infinity() {
        assert!(Percentage::of(5.0, 0.0).value().is_finite());
        assert!(Percentage::of(f64::NAN, 10.0).value().is_finite());
        assert!(Percentage::of(5.0, f64::INFINITY).value().is_finite());
    }

    #[test]
    fn percentage_value_is_unrounded() {
        let pct = Percentage::of(1.0, 3.0);
        assert!((pct.value() - 33.333_333).abs() < 1e-5);
    }

    #[test]
    fn percentage_serializes_as_display_string() {
        let json = serde_json::to_string(&Percentage::of(5.0, 25.0)).unwrap();
        assert_eq!(json, "\"20.00%\"");
    }

    #[test]
    fn percentage_default_has_no_base() {
        assert!(Percentage::default().has_no_base());
    }
}
