//! Lenient numeric parsing for quantities, weights, and amounts.
//!
//! Records reach the engine from forms, spreadsheets, and an HTTP API, so
//! numbers arrive as JSON numbers or as text such as `"1,250.50"` or
//! `"$ 3,000"`. Anything that cannot be read as a non-negative finite
//! number becomes `0` and is reported as a [`ParseError`].

use serde::{Deserialize, Serialize};

use super::ParseError;

/// Parses `raw` as a non-negative amount.
///
/// Blank input is treated as absent and yields `0` without an error.
/// Currency signs, thousands separators, and inner whitespace are ignored.
pub fn lenient_amount(field: &str, raw: &str) -> (f64, Option<ParseError>) {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\u{a0}'))
        .collect();

    if cleaned.is_empty() {
        return (0.0, None);
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => (value, None),
        _ => (0.0, Some(ParseError::invalid_number(field, raw))),
    }
}

/// A number as it appears in loosely typed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    /// Resolves to a non-negative finite value, defaulting to `0`.
    pub fn resolve(&self, field: &str) -> (f64, Option<ParseError>) {
        match self {
            LenientNumber::Number(value) if value.is_finite() && *value >= 0.0 => (*value, None),
            LenientNumber::Number(value) => {
                (0.0, Some(ParseError::invalid_number(field, value.to_string())))
            }
            LenientNumber::Text(text) => lenient_amount(field, text),
        }
    }

    /// Resolves to a value, discarding any parse error.
    pub fn value_or_zero(&self) -> f64 {
        self.resolve("").0
    }
}

impl Default for LenientNumber {
    fn default() -> Self {
        LenientNumber::Number(0.0)
    }
}

impl From<f64> for LenientNumber {
    fn from(value: f64) -> Self {
        LenientNumber::Number(value)
    }
}

impl From<&str> for LenientNumber {
    fn from(value: &str) -> Self {
        LenientNumber::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(lenient_amount("q", "12"), (12.0, None));
        assert_eq!(lenient_amount("q", " 2.5 "), (2.5, None));
    }

    #[test]
    fn currency_and_separators_are_ignored() {
        assert_eq!(lenient_amount("monto", "$ 1,250,000.50").0, 1_250_000.5);
    }

    #[test]
    fn blank_is_absent_not_an_error() {
        assert_eq!(lenient_amount("q", "   "), (0.0, None));
    }

    #[test]
    fn garbage_defaults_to_zero_with_error() {
        let (value, err) = lenient_amount("cantidad", "dos");
        assert_eq!(value, 0.0);
        assert_eq!(err, Some(ParseError::invalid_number("cantidad", "dos")));
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        assert!(lenient_amount("q", "-3").1.is_some());
        assert!(lenient_amount("q", "inf").1.is_some());
        assert!(lenient_amount("q", "NaN").1.is_some());
        assert!(LenientNumber::Number(-1.0).resolve("q").1.is_some());
        assert_eq!(LenientNumber::Number(f64::NAN).value_or_zero(), 0.0);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let values: Vec<LenientNumber> = serde_json::from_str(r#"[3, "4.5", "x"]"#).unwrap();
        assert_eq!(values[0].value_or_zero(), 3.0);
        assert_eq!(values[1].value_or_zero(), 4.5);
        assert_eq!(values[2].value_or_zero(), 0.0);
    }
}
