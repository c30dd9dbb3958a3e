use crate::view::FilteredView;
use core_types::SearchField;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub matched_row_count: usize,
    pub total_sales: Decimal,
}

/// Rows whose `field` equals `value` exactly (case-sensitive) and their summed `total`.
///
/// A value that matches nothing yields `{0, 0}`.
pub fn search(view: &FilteredView<'_>, field: SearchField, value: &str) -> SearchResult {
    let dimension = field.dimension();
    let result = view
        .rows()
        .filter(|row| dimension.value_of(row) == value)
        .fold(SearchResult::default(), |mut acc, row| {
            acc.matched_row_count += 1;
            acc.total_sales += row.total;
            acc
        });
    tracing::debug!(%field, value, matches = result.matched_row_count, "Search evaluated.");
    result
}
