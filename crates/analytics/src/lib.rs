//! # SaleScope Analytics Engine
//!
//! The query side of the dashboard: date and category filtering, KPIs, grouped breakdowns,
//! the monthly trend, numeric correlations, dimension search and quick insights.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or terminals.
//!   It depends only on `core-types` (Layer 0).
//! - **Explicit views:** every query takes a `FilteredView` argument and returns a fresh value.
//!   There is no session object and no hidden "current selection".
//! - **Total functions:** an empty view, a search with no match or a constant column are
//!   ordinary results (`has_data: false`, zero counts, `None` coefficients), never errors.
//!
//! ## Public API
//!
//! - `ViewFilter` / `filter_by_date`: derive a `FilteredView` from a `SalesTable`.
//! - `kpis`, `group_sum`, `group_mean`, `group_count`, `shares`, `monthly_trend`,
//!   `correlate`, `search`, `quick_insights`: the individual queries.
//! - `AnalyticsEngine`: runs every query over one view and returns a `DashboardReport`.

pub mod correlation;
pub mod engine;
pub mod grouping;
pub mod insights;
pub mod kpi;
pub mod report;
pub mod search;
pub mod trend;
pub mod view;

#[cfg(test)]
mod test_support;

pub use correlation::{Correlation, CorrelationMatrix, correlate};
pub use engine::AnalyticsEngine;
pub use grouping::{GroupCount, GroupShare, GroupTotal, group_count, group_mean, group_sum, shares};
pub use insights::{QuickInsights, quick_insights};
pub use kpi::{Kpis, kpis};
pub use report::DashboardReport;
pub use search::{SearchResult, search};
pub use trend::{MonthlyTotal, YearMonth, monthly_trend};
pub use view::{DateRange, DateSpan, FilteredView, ViewFilter, filter_by_date};
