//! Quantifiable items - anything that contributes to a grouped aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LenientNumber, ParseError};

/// Catch-all bucket for items without a category.
pub const UNCATEGORIZED: &str = "Sin Categoría";

/// An entity that can be grouped and summed.
pub trait Quantifiable {
    /// Grouping key. `None` or blank lands in [`UNCATEGORIZED`].
    fn category(&self) -> Option<&str>;

    /// Non-negative quantity.
    fn quantity(&self) -> f64;

    /// Non-negative value per unit (unit weight, amount, ...).
    fn unit_value(&self) -> f64;

    /// `quantity * unit_value`.
    fn line_value(&self) -> f64 {
        self.quantity() * self.unit_value()
    }
}

/// Plain quantifiable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantifiableItem {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_value: f64,
}

impl QuantifiableItem {
    /// Creates an item; negative or non-finite numbers become `0`.
    pub fn new(category: impl Into<String>, quantity: f64, unit_value: f64) -> Self {
        Self {
            category: Some(category.into()),
            quantity: non_negative(quantity),
            unit_value: non_negative(unit_value),
        }
    }

    /// Creates an item without a category.
    pub fn uncategorized(quantity: f64, unit_value: f64) -> Self {
        Self {
            category: None,
            quantity: non_negative(quantity),
            unit_value: non_negative(unit_value),
        }
    }

    /// Builds an item from loosely typed input, collecting parse errors.
    pub fn from_lenient(
        category: Option<&str>,
        quantity: &LenientNumber,
        unit_value: &LenientNumber,
    ) -> (Self, Vec<ParseError>) {
        let (quantity, quantity_err) = quantity.resolve("quantity");
        let (unit_value, unit_err) = unit_value.resolve("unit_value");
        let item = Self {
            category: category.map(str::to_string),
            quantity,
            unit_value,
        };
        let errors = quantity_err.into_iter().chain(unit_err).collect();
        (item, errors)
    }
}

impl Quantifiable for QuantifiableItem {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn quantity(&self) -> f64 {
        non_negative(self.quantity)
    }

    fn unit_value(&self) -> f64 {
        non_negative(self.unit_value)
    }
}

/// Clamps negative, NaN, and infinite values to zero.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
