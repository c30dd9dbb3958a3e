use crate::correlation::Correlation;
use crate::grouping::{GroupCount, GroupShare, GroupTotal};
use crate::insights::QuickInsights;
use crate::kpi::Kpis;
use crate::trend::MonthlyTotal;
use crate::view::DateSpan;
use core_types::Dimension;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the dashboard shows for one filtered view.
///
/// This struct is the final output of the `AnalyticsEngine` and the single payload a
/// presentation layer needs to render every widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// `None` when the view is empty.
    pub date_span: Option<DateSpan>,
    pub kpis: Kpis,

    // Breakdowns
    pub sales_by: BTreeMap<Dimension, Vec<GroupTotal>>,
    pub payment_counts: Vec<GroupCount>,
    pub product_line_shares: Vec<GroupShare>,
    pub city_shares: Vec<GroupShare>,

    // Time and relationships
    pub monthly_trend: Vec<MonthlyTotal>,
    pub correlation: Correlation,

    pub insights: QuickInsights,
}

impl DashboardReport {
    pub fn sales_by(&self, dimension: Dimension) -> &[GroupTotal] {
        self.sales_by.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }
}
