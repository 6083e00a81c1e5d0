//! Packing lists and their line items.

use serde::{Deserialize, Serialize};

use super::CategoryCatalog;
use crate::domain::aggregate::{reduce, AggregateReport, Quantifiable};
use crate::domain::foundation::{LenientNumber, ParseError};

/// One shipped line: a material, its quantity, and its unit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListItem {
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: LenientNumber,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_weight_kg: LenientNumber,
}

impl PackingListItem {
    /// Creates an item with numeric fields.
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        unit_weight_kg: f64,
    ) -> Self {
        Self {
            description: description.into(),
            category: Some(category.into()),
            quantity: LenientNumber::from(quantity),
            unit: None,
            unit_weight_kg: LenientNumber::from(unit_weight_kg),
        }
    }

    /// Numeric fields that could not be read.
    pub fn parse_errors(&self) -> Vec<ParseError> {
        let (_, quantity_err) = self.quantity.resolve("quantity");
        let (_, weight_err) = self.unit_weight_kg.resolve("unit_weight_kg");
        quantity_err.into_iter().chain(weight_err).collect()
    }
}

impl Quantifiable for PackingListItem {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn quantity(&self) -> f64 {
        self.quantity.value_or_zero()
    }

    fn unit_value(&self) -> f64 {
        self.unit_weight_kg.value_or_zero()
    }
}

/// A shipment's packing list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    #[serde(default)]
    pub folio: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub items: Vec<PackingListItem>,
}

impl PackingList {
    /// Pieces, weight, and weight share per category.
    pub fn summary(&self) -> AggregateReport {
        reduce(&self.items)
    }

    /// Total shipped weight in kilograms.
    pub fn total_weight_kg(&self) -> f64 {
        self.items.iter().map(|item| item.line_value()).sum()
    }

    /// Rewrites every item's category to its canonical catalog name.
    pub fn normalize_categories(&mut self, catalog: &CategoryCatalog) {
        for item in &mut self.items {
            item.category = Some(catalog.normalize(item.category.as_deref()));
        }
    }

    /// Parse errors per item, tagged with the 1-based item position.
    pub fn parse_errors(&self) -> Vec<ParseError> {
        self.items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| {
                item.parse_errors()
                    .into_iter()
                    .map(move |err| err.at_row(index + 1))
            })
            .collect()
    }
}
