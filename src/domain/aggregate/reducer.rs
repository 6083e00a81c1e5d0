//! Aggregate Reducer - groups quantifiable items by category.
//!
//! Accumulation walks the input once, in the given order, adding into the
//! group each item belongs to. Groups come out in first-seen order.
//! Sums saturate at `f64::MAX` and a line value that does not fit a finite
//! number counts as zero, so no total is ever NaN or infinite.

use serde::Serialize;
use std::collections::HashMap;

use super::{Quantifiable, UNCATEGORIZED};
use crate::domain::foundation::{serialize_messages, ParseError, Percentage};

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub category: String,
    /// Sum of quantities (not the number of items).
    pub count: f64,
    /// Sum of line values.
    pub total_value: f64,
    /// Share of the grand total value.
    pub percentage: Percentage,
}

impl GroupSummary {
    /// Numeric share in percent, 0 when the grand total is 0.
    pub fn percentage_value(&self) -> f64 {
        self.percentage.value()
    }
}

/// Grouped totals plus the grand total.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub groups: Vec<GroupSummary>,
    pub grand_total_value: f64,
    /// Items whose line value overflowed, tagged with their 1-based position.
    #[serde(serialize_with = "serialize_messages", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ParseError>,
}

impl AggregateReport {
    /// Looks up a group by its category label.
    pub fn group(&self, category: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Sum of all group counts.
    pub fn total_count(&self) -> f64 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Returns true if no items were reduced.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups `items` by category and computes totals and percentages.
pub fn reduce<'a, T, I>(items: I) -> AggregateReport
where
    T: Quantifiable + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, f64, f64)> = Vec::new();
    let mut grand_total_value = 0.0;
    let mut errors = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        let key = category_key(item.category());
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push((key.clone(), 0.0, 0.0));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let mut line_value = item.line_value();
        if !line_value.is_finite() {
            let value = format!("{:e} x {:e}", item.quantity(), item.unit_value());
            errors.push(ParseError::invalid_number("line_value", value).at_row(position + 1));
            line_value = 0.0;
        }

        let group = &mut groups[slot];
        group.1 = saturating_add(group.1, item.quantity());
        group.2 = saturating_add(group.2, line_value);
        grand_total_value = saturating_add(grand_total_value, line_value);
    }

    let groups = groups
        .into_iter()
        .map(|(category, count, total_value)| GroupSummary {
            percentage: Percentage::of(total_value, grand_total_value),
            category,
            count,
            total_value,
        })
        .collect();

    AggregateReport {
        groups,
        grand_total_value,
        errors,
    }
}

fn saturating_add(total: f64, value: f64) -> f64 {
    let sum = total + value;
    if sum.is_finite() {
        sum
    } else {
        f64::MAX
    }
}

fn category_key(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}
