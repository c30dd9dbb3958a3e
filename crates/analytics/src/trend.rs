use crate::view::FilteredView;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Serialized as `YYYY-MM`.
impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Sum of `total` per calendar month, oldest first.
///
/// Only months with at least one sale appear; gaps are not zero-filled.
pub fn monthly_trend(view: &FilteredView<'_>) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for row in view.rows() {
        *buckets.entry(YearMonth::of(row.date)).or_insert(Decimal::ZERO) += row.total;
    }
    buckets
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sale_on;
    use core_types::SalesTable;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn buckets_by_month_in_order_and_skips_gaps() {
        let table = SalesTable::new(vec![
            sale_on("2019-03-02", dec!(5)),
            sale_on("2019-01-31", dec!(10)),
            sale_on("2018-12-01", dec!(1)),
            sale_on("2019-01-01", dec!(2.5)),
        ]);
        let trend = monthly_trend(&FilteredView::all(&table));

        let keys: Vec<String> = trend.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(keys, vec!["2018-12", "2019-01", "2019-03"]);
        assert_eq!(trend[1].total, dec!(12.5));
        assert!(trend.windows(2).all(|w| w[0].month < w[1].month));
    }

    #[test]
    fn empty_view_has_no_buckets() {
        assert!(monthly_trend(&FilteredView::default()).is_empty());
    }

    #[test]
    fn year_month_serializes_as_text() {
        let month = YearMonth { year: 2019, month: 2 };
        assert_eq!(month.to_string(), "2019-02");
        assert_eq!(YearMonth::of("2019-02-28".parse().unwrap()), month);
    }
}
