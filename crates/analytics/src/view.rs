use chrono::NaiveDate;
use core_types::{Dimension, SalesTable, Transaction};
use serde::{Deserialize, Serialize};

/// An inclusive calendar range. A range whose start is after its end contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// First and last sale date of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// The predicates a view is derived with.
///
/// `None` for an allow-list means every value passes. `Some(vec![])` lets nothing through,
/// the same as a multi-select with every option cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub date_range: Option<DateRange>,
    pub cities: Option<Vec<String>>,
    pub product_lines: Option<Vec<String>>,
    pub genders: Option<Vec<String>>,
}

impl ViewFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            date_range: Some(DateRange::new(start, end)),
            ..Self::default()
        }
    }

    pub fn with_cities(mut self, cities: Vec<String>) -> Self {
        self.cities = Some(cities);
        self
    }

    pub fn with_product_lines(mut self, product_lines: Vec<String>) -> Self {
        self.product_lines = Some(product_lines);
        self
    }

    pub fn with_genders(mut self, genders: Vec<String>) -> Self {
        self.genders = Some(genders);
        self
    }

    pub fn matches(&self, row: &Transaction) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(row.date) {
                return false;
            }
        }
        allowed(&self.cities, Dimension::City, row)
            && allowed(&self.product_lines, Dimension::ProductLine, row)
            && allowed(&self.genders, Dimension::Gender, row)
    }

    /// Derives the view of `table` holding exactly the matching rows, in table order.
    pub fn apply<'a>(&self, table: &'a SalesTable) -> FilteredView<'a> {
        let rows: Vec<&Transaction> = table.rows().iter().filter(|row| self.matches(row)).collect();
        tracing::debug!(
            table_rows = table.len(),
            view_rows = rows.len(),
            "Filtered view derived."
        );
        FilteredView { rows }
    }
}

fn allowed(list: &Option<Vec<String>>, dimension: Dimension, row: &Transaction) -> bool {
    match list {
        Some(values) => values.iter().any(|v| v == dimension.value_of(row)),
        None => true,
    }
}

/// Rows with `start <= date <= end`, in table order. `start > end` gives an empty view.
pub fn filter_by_date(table: &SalesTable, start: NaiveDate, end: NaiveDate) -> FilteredView<'_> {
    ViewFilter::between(start, end).apply(table)
}

/// A read-only selection of rows borrowed from a `SalesTable`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Transaction>,
}

impl<'a> FilteredView<'a> {
    /// A view over the whole table.
    pub fn all(table: &'a SalesTable) -> Self {
        Self {
            rows: table.rows().iter().collect(),
        }
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a Transaction> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows, for previews.
    pub fn head(&self, n: usize) -> &[&'a Transaction] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn date_span(&self) -> Option<DateSpan> {
        let first = self.rows.first()?.date;
        let (first, last) = self
            .rows
            .iter()
            .fold((first, first), |(min, max), row| (min.min(row.date), max.max(row.date)));
        Some(DateSpan { first, last })
    }
}
