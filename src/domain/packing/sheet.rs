//! Spreadsheet import and export for packing lists.
//!
//! Works on plain rows of cell text, as produced by any spreadsheet
//! reader. Import locates the header row by its column titles rather than
//! assuming it is the first row, since exported sheets usually carry a
//! title block above the table.

use thiserror::Error;

use super::catalog::fold;
use super::{CategoryCatalog, PackingList, PackingListItem};
use crate::domain::aggregate::Quantifiable;
use crate::domain::foundation::{lenient_amount, LenientNumber, ParseError};

/// How many leading rows are searched for the header.
pub const HEADER_SEARCH_ROWS: usize = 10;

/// Column titles written on export.
pub const EXPORT_HEADER: [&str; 6] = [
    "Categoría",
    "Descripción",
    "Cantidad",
    "Unidad",
    "Peso unitario (kg)",
    "Peso total (kg)",
];

/// Errors that abort an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackingImportError {
    #[error("No header row with description and quantity columns in the first {0} rows")]
    HeaderNotFound(usize),
}

/// Items read from a sheet plus the cells that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetImport {
    /// 1-based row number of the detected header.
    pub header_row: usize,
    pub items: Vec<PackingListItem>,
    /// Unreadable numeric cells, tagged with their 1-based row. The
    /// affected values were imported as `0`.
    pub errors: Vec<ParseError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Category,
    Description,
    Quantity,
    Unit,
    UnitWeight,
}

#[derive(Debug, Default)]
struct ColumnMap {
    category: Option<usize>,
    description: Option<usize>,
    quantity: Option<usize>,
    unit: Option<usize>,
    unit_weight: Option<usize>,
}

impl ColumnMap {
    fn from_header(row: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (index, cell) in row.iter().enumerate() {
            let slot = match classify_title(cell) {
                Some(Column::Category) => &mut map.category,
                Some(Column::Description) => &mut map.description,
                Some(Column::Quantity) => &mut map.quantity,
                Some(Column::Unit) => &mut map.unit,
                Some(Column::UnitWeight) => &mut map.unit_weight,
                None => continue,
            };
            slot.get_or_insert(index);
        }
        map
    }

    fn is_header(&self) -> bool {
        self.description.is_some() && self.quantity.is_some()
    }
}

fn classify_title(cell: &str) -> Option<Column> {
    let title = fold(cell);
    if title.is_empty() || title.contains("total") {
        return None;
    }

    const TITLES: &[(Column, &[&str])] = &[
        (Column::Category, &["categoria", "tipo", "familia"]),
        (Column::Description, &["descripcion", "material", "concepto"]),
        (Column::Quantity, &["cantidad", "cant", "qty", "piezas"]),
        (Column::UnitWeight, &["peso unitario", "peso unit", "peso", "kg"]),
        (Column::Unit, &["unidad", "u.m", "um"]),
    ];

    TITLES.iter().find_map(|(column, prefixes)| {
        prefixes
            .iter()
            .any(|prefix| title.starts_with(prefix))
            .then_some(*column)
    })
}

fn cell(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|index| row.get(index))
        .map(|s| s.trim())
        .unwrap_or("")
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

fn is_footer(row: &[String]) -> bool {
    row.iter()
        .map(|c| fold(c))
        .find(|c| !c.is_empty())
        .is_some_and(|first| first.starts_with("total") || first.starts_with("resumen"))
}

/// Reads packing list items from sheet rows.
///
/// Categories are normalized through `catalog`. Blank rows are skipped and
/// reading stops at a `Total` or `Resumen` row.
pub fn import_rows(
    rows: &[Vec<String>],
    catalog: &CategoryCatalog,
) -> Result<SheetImport, PackingImportError> {
    let (header_index, columns) = rows
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .map(|(index, row)| (index, ColumnMap::from_header(row)))
        .find(|(_, map)| map.is_header())
        .ok_or(PackingImportError::HeaderNotFound(HEADER_SEARCH_ROWS))?;

    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate().skip(header_index + 1) {
        if is_blank(row) {
            continue;
        }
        if is_footer(row) {
            break;
        }
        let row_number = index + 1;

        let (quantity, quantity_err) = lenient_amount("cantidad", cell(row, columns.quantity));
        let (unit_weight, weight_err) =
            lenient_amount("peso_unitario", cell(row, columns.unit_weight));
        errors.extend(
            quantity_err
                .into_iter()
                .chain(weight_err)
                .map(|err| err.at_row(row_number)),
        );

        let unit = cell(row, columns.unit);
        items.push(PackingListItem {
            description: cell(row, columns.description).to_string(),
            category: Some(catalog.normalize(Some(cell(row, columns.category)))),
            quantity: LenientNumber::from(quantity),
            unit: (!unit.is_empty()).then(|| unit.to_string()),
            unit_weight_kg: LenientNumber::from(unit_weight),
        });
    }

    Ok(SheetImport {
        header_row: header_index + 1,
        items,
        errors,
    })
}

/// Writes a packing list as sheet rows.
///
/// Layout: header, one row per item, a blank row, then a per-category
/// summary (pieces, weight, share) and a total row.
pub fn export_rows(list: &PackingList) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(list.items.len() + 8);
    rows.push(EXPORT_HEADER.iter().map(|s| s.to_string()).collect());

    for item in &list.items {
        rows.push(vec![
            item.category.clone().unwrap_or_default(),
            item.description.clone(),
            item.quantity().to_string(),
            item.unit.clone().unwrap_or_default(),
            item.unit_value().to_string(),
            item.line_value().to_string(),
        ]);
    }

    let summary = list.summary();
    rows.push(Vec::new());
    rows.push(
        ["Resumen por categoría", "Piezas", "Peso (kg)", "Porcentaje"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    for group in &summary.groups {
        rows.push(vec![
            group.category.clone(),
            format_summary(group.count),
            format_summary(group.total_value),
            group.percentage.to_string(),
        ]);
    }
    rows.push(vec![
        "Total".to_string(),
        format_summary(summary.total_count()),
        format_summary(summary.grand_total_value),
        if summary.grand_total_value == 0.0 {
            "0%".to_string()
        } else {
            "100.00%".to_string()
        },
    ]);

    rows
}

/// Summary cells are for reading, item cells keep full precision.
fn format_summary(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
