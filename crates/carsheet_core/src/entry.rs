use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Export/display name of the brand column.
pub const BRAND_COLUMN: &str = "Brand";
/// Export/display name of the model column.
pub const MODEL_COLUMN: &str = "Model";
/// Export/display name of the model-year column.
pub const YEAR_COLUMN: &str = "Year";

/// One scraped car record.
///
/// The source pages do not guarantee a fixed schema across listings, so only
/// the three columns present on every listing are typed; every other labeled
/// cell lives in the open `specs` mapping (header label -> cell text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub specs: BTreeMap<String, String>,
}

impl ListingEntry {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            year,
            specs: BTreeMap::new(),
        }
    }

    /// Builder-style helper for adding one spec field.
    pub fn with_spec(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.specs.insert(label.into(), value.into());
        self
    }

    /// Value of a column by its export/display name.
    ///
    /// Returns `None` when the column is absent or blank for this entry, so
    /// exports render it as an empty cell.
    pub fn field(&self, column: &str) -> Option<String> {
        match column {
            BRAND_COLUMN => non_blank(&self.brand),
            MODEL_COLUMN => non_blank(&self.model),
            YEAR_COLUMN => self.year.map(|y| y.to_string()),
            other => self.specs.get(other).cloned(),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Union of column names across `entries`: the three fixed columns first,
/// then every spec label observed, in sorted order.
pub fn column_names(entries: &[ListingEntry]) -> Vec<String> {
    let mut columns = vec![
        BRAND_COLUMN.to_string(),
        MODEL_COLUMN.to_string(),
        YEAR_COLUMN.to_string(),
    ];
    let spec_labels: BTreeSet<&String> = entries.iter().flat_map(|e| e.specs.keys()).collect();
    columns.extend(spec_labels.into_iter().cloned());
    columns
}
