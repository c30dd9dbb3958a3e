use crate::correlation::correlate;
use crate::grouping::{group_count, group_sum, shares};
use crate::insights::{DEFAULT_RECENT_WINDOW, quick_insights};
use crate::kpi::kpis;
use crate::report::DashboardReport;
use crate::trend::monthly_trend;
use crate::view::FilteredView;
use core_types::Dimension;

/// A stateless calculator that runs every dashboard query over a view.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    recent_window: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many of the most recent records the quick insights sum.
    pub fn with_recent_window(mut self, recent_window: usize) -> Self {
        self.recent_window = recent_window;
        self
    }

    /// Builds the full dashboard for `view`.
    ///
    /// Every section is computed independently from the same view, so the result does not
    /// depend on evaluation order and two calls on the same view are equal.
    #[tracing::instrument(name = "dashboard_report", skip_all, fields(rows = view.len()))]
    pub fn report(&self, view: &FilteredView<'_>) -> DashboardReport {
        let sales_by = Dimension::DASHBOARD
            .into_iter()
            .map(|dimension| (dimension, group_sum(view, dimension)))
            .collect();

        let report = DashboardReport {
            date_span: view.date_span(),
            kpis: kpis(view),
            product_line_shares: shares(&group_sum(view, Dimension::ProductLine)),
            city_shares: shares(&group_sum(view, Dimension::City)),
            sales_by,
            payment_counts: group_count(view, Dimension::Payment),
            monthly_trend: monthly_trend(view),
            correlation: correlate(view),
            insights: quick_insights(view, self.recent_window),
        };

        tracing::info!(
            transactions = report.kpis.transaction_count,
            total_sales = %report.kpis.total_sales,
            "Dashboard report generated."
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::Correlation;
    use crate::test_support::sale_on;
    use core_types::{SalesTable, Transaction};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_view_renders_a_no_data_report() {
        let report = AnalyticsEngine::new().report(&FilteredView::default());
        assert!(!report.kpis.has_data);
        assert_eq!(report.date_span, None);
        assert!(report.sales_by(Dimension::City).is_empty());
        assert!(report.product_line_shares.is_empty());
        assert!(report.monthly_trend.is_empty());
        assert_eq!(report.correlation, Correlation::InsufficientData { rows: 0 });
        assert_eq!(report.insights.recent_window, 30);
    }

    #[test]
    fn every_breakdown_adds_up_to_the_kpi_total() {
        let table = SalesTable::new(vec![
            Transaction { gender: "Male".to_string(), ..sale_on("2019-01-10", dec!(12.5)) },
            Transaction { payment: "Cash".to_string(), ..sale_on("2019-02-10", dec!(7.25)) },
            Transaction { city: "Mandalay".to_string(), ..sale_on("2019-02-11", dec!(3)) },
        ]);
        let report = AnalyticsEngine::new().with_recent_window(2).report(&FilteredView::all(&table));

        for dimension in Dimension::DASHBOARD {
            let sum: Decimal = report.sales_by(dimension).iter().map(|g| g.value).sum();
            assert_eq!(sum, report.kpis.total_sales);
        }
        let trend_sum: Decimal = report.monthly_trend.iter().map(|m| m.total).sum();
        assert_eq!(trend_sum, dec!(22.75));
        assert_eq!(report.insights.recent_sales, dec!(10.25));
    }

    #[test]
    fn reports_are_reproducible() {
        let table = SalesTable::new(vec![
            Transaction { rating: dec!(4.2), unit_price: dec!(31), ..sale_on("2019-01-10", dec!(12.5)) },
            Transaction { rating: dec!(9.9), unit_price: dec!(12), ..sale_on("2019-03-02", dec!(99)) },
        ]);
        let view = FilteredView::all(&table);
        let engine = AnalyticsEngine::new();
        assert_eq!(engine.report(&view), engine.report(&view));
    }
}
