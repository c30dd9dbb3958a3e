use crate::grouping::{GroupCount, GroupTotal, group_count, group_sum};
use crate::view::FilteredView;
use core_types::{Dimension, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of most recent records summed by `quick_insights`.
pub const DEFAULT_RECENT_WINDOW: usize = 30;

/// One-line highlights of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickInsights {
    pub top_city: Option<GroupTotal>,
    /// Most used payment method, by number of transactions.
    pub top_payment: Option<GroupCount>,
    pub top_product_line: Option<GroupTotal>,
    pub recent_window: usize,
    /// Total sales of the `recent_window` latest records by date.
    pub recent_sales: Decimal,
}

/// Leaders use the same ranking as the grouped breakdowns, so ties go to the
/// alphabetically first value.
pub fn quick_insights(view: &FilteredView<'_>, recent_window: usize) -> QuickInsights {
    QuickInsights {
        top_city: group_sum(view, Dimension::City).into_iter().next(),
        top_payment: group_count(view, Dimension::Payment).into_iter().next(),
        top_product_line: group_sum(view, Dimension::ProductLine).into_iter().next(),
        recent_window,
        recent_sales: recent_sales(view, recent_window),
    }
}

fn recent_sales(view: &FilteredView<'_>, window: usize) -> Decimal {
    let mut latest: Vec<&Transaction> = view.rows().collect();
    // Stable sort: rows sharing a date keep their table order.
    latest.sort_by(|a, b| b.date.cmp(&a.date));
    latest.iter().take(window).map(|row| row.total).sum()
}
