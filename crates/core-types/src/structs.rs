use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single sale, fully typed.
///
/// `total` is carried as stored in the source. It is never recomputed from
/// `unit_price * quantity + tax`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub branch: String,
    pub city: String,
    /// `Member` or `Normal` in the reference dataset.
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub tax: Decimal,
    pub total: Decimal,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub payment: String,
    /// Customer rating on a 0-10 scale.
    pub rating: Decimal,
}

/// The canonical, immutable table of a session.
///
/// Rows keep their source order. The table is cheap to clone and cannot be
/// mutated after construction, so any number of views can borrow from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesTable {
    rows: Arc<[Transaction]>,
}

impl SalesTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest sale date in the table, if any.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?.date;
        Some(self.rows.iter().fold((first, first), |(min, max), row| {
            (min.min(row.date), max.max(row.date))
        }))
    }
}

impl From<Vec<Transaction>> for SalesTable {
    fn from(rows: Vec<Transaction>) -> Self {
        Self::new(rows)
    }
}
