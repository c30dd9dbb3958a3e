use crate::view::FilteredView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline metrics of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_sales: Decimal,
    /// Zero when `has_data` is false.
    pub avg_rating: Decimal,
    pub transaction_count: usize,
    /// False for an empty view, where the mean rating is undefined.
    pub has_data: bool,
}

impl Kpis {
    /// The KPIs of a view with no rows.
    pub fn empty() -> Self {
        Self {
            total_sales: Decimal::ZERO,
            avg_rating: Decimal::ZERO,
            transaction_count: 0,
            has_data: false,
        }
    }
}

impl Default for Kpis {
    fn default() -> Self {
        Self::empty()
    }
}

pub fn kpis(view: &FilteredView<'_>) -> Kpis {
    if view.is_empty() {
        return Kpis::empty();
    }

    let (total_sales, rating_sum) = view
        .rows()
        .fold((Decimal::ZERO, Decimal::ZERO), |(sales, ratings), row| {
            (sales + row.total, ratings + row.rating)
        });
    let transaction_count = view.len();

    Kpis {
        total_sales,
        avg_rating: rating_sum / Decimal::from(transaction_count),
        transaction_count,
        has_data: true,
    }
}
