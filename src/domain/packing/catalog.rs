//! Packing list category catalog and normalization.

use crate::domain::aggregate::UNCATEGORIZED;

/// Categories used on packing lists shipped from the fabrication shop.
pub const STANDARD_CATEGORIES: &[&str] = &[
    "Tubería",
    "Válvula",
    "Brida",
    "Conexión",
    "Estructura",
    "Soldadura",
    "Eléctrico",
    "Instrumentación",
    "Equipo",
    "Herramienta",
    "Consumible",
];

/// Known categories with lenient matching.
///
/// Matching ignores case, accents, surrounding and repeated whitespace,
/// and a plural `s` / `es` suffix, so `"  VALVULAS "` resolves to
/// `"Válvula"`. Anything else resolves to [`UNCATEGORIZED`].
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    entries: Vec<(String, String)>,
}

impl CategoryCatalog {
    /// Builds a catalog from canonical category names.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = categories
            .into_iter()
            .map(Into::into)
            .map(|canonical: String| (fold(&canonical), canonical))
            .collect();
        Self { entries }
    }

    /// Catalog of [`STANDARD_CATEGORIES`].
    pub fn standard() -> Self {
        Self::new(STANDARD_CATEGORIES.iter().copied())
    }

    /// Canonical names in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, canonical)| canonical.as_str())
    }

    /// Resolves free text to a canonical category.
    pub fn normalize(&self, raw: Option<&str>) -> String {
        self.lookup(raw.unwrap_or_default())
            .unwrap_or(UNCATEGORIZED)
            .to_string()
    }

    /// Resolves free text, or `None` if it matches no category.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let folded = fold(raw);
        if folded.is_empty() {
            return None;
        }

        let candidates = [
            Some(folded.as_str()),
            folded.strip_suffix("es"),
            folded.strip_suffix('s'),
        ];

        let canonical = candidates.into_iter().flatten().find_map(|candidate| {
            self.entries
                .iter()
                .find(|(key, _)| key == candidate)
                .map(|(_, canonical)| canonical.as_str())
        });
        canonical
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lowercases, strips Spanish accents, and collapses whitespace.
pub(crate) fn fold(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
