use analytics::{
    AnalyticsEngine, Correlation, FilteredView, ViewFilter, filter_by_date, group_sum, kpis,
    monthly_trend, search,
};
use chrono::{Days, NaiveDate, NaiveTime};
use core_types::{Dimension, NumericColumn, SalesTable, SearchField, Transaction};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SAMPLE: &str = include_str!("../../dataset/tests/fixtures/supermarket_sample.csv");

fn sample() -> SalesTable {
    dataset::load(SAMPLE.as_bytes()).expect("sample dataset loads")
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn kpis_over_the_sample() {
    let table = sample();
    let result = kpis(&FilteredView::all(&table));
    assert_eq!(result.total_sales, dec!(4343.652));
    assert_eq!(result.transaction_count, 12);
    assert!(result.has_data);
    // (9.1 + 9.6 + 7.4 + 8.4 + 5.3 + 4.1 + 5.8 + 8 + 7.2 + 5.9 + 4.5 + 6.8) / 12
    assert_eq!(result.avg_rating, dec!(82.1) / dec!(12));
}

#[test]
fn city_breakdown_and_search_agree() {
    let table = sample();
    let view = FilteredView::all(&table);

    let by_city = group_sum(&view, Dimension::City);
    let keys: Vec<_> = by_city.iter().map(|g| (g.key.as_str(), g.value)).collect();
    assert_eq!(
        keys,
        vec![
            ("Yangon", dec!(2522.7615)),
            ("Naypyitaw", dec!(1480.2165)),
            ("Mandalay", dec!(340.674)),
        ]
    );

    for group in &by_city {
        assert_eq!(search(&view, SearchField::City, &group.key).total_sales, group.value);
    }
    let yangon = search(&view, SearchField::City, "Yangon");
    assert_eq!(yangon.matched_row_count, 6);
}

#[test]
fn monthly_trend_over_the_sample() {
    let table = sample();
    let trend = monthly_trend(&FilteredView::all(&table));
    let months: Vec<_> = trend.iter().map(|m| (m.month.to_string(), m.total)).collect();
    assert_eq!(
        months,
        vec![
            ("2019-01".to_string(), dec!(1114.1655)),
            ("2019-02".to_string(), dec!(2074.0125)),
            ("2019-03".to_string(), dec!(1155.474)),
        ]
    );
}

#[test]
fn february_only_view() {
    let table = sample();
    let view = filter_by_date(&table, date("2019-02-01"), date("2019-02-28"));
    assert_eq!(view.len(), 5);
    assert_eq!(kpis(&view).total_sales, dec!(2074.0125));
    assert_eq!(monthly_trend(&view).len(), 1);
}

#[test]
fn range_outside_the_dataset_is_a_no_data_state() {
    let table = sample();
    let view = filter_by_date(&table, date("2020-01-01"), date("2020-12-31"));
    let report = AnalyticsEngine::new().report(&view);
    assert!(!report.kpis.has_data);
    assert_eq!(report.kpis.total_sales, Decimal::ZERO);
    assert_eq!(report.correlation, Correlation::InsufficientData { rows: 0 });
    assert_eq!(search(&view, SearchField::City, "Yangon").matched_row_count, 0);
}

#[test]
fn sample_correlations_are_defined() {
    let table = sample();
    let report = AnalyticsEngine::new().report(&FilteredView::all(&table));
    let matrix = report.correlation.matrix().expect("twelve rows are enough");
    assert_eq!(matrix.get(NumericColumn::Total, NumericColumn::Total), Some(1.0));
    let tax_total = matrix.get(NumericColumn::Tax, NumericColumn::Total).unwrap();
    // Tax is a fixed 5% of the pre-tax amount, so tax and total move together.
    assert!(tax_total > 0.999);
}

#[test]
fn filtered_export_reloads_to_the_same_rows() {
    let table = sample();
    let view = ViewFilter::between(date("2019-01-01"), date("2019-02-28"))
        .with_cities(vec!["Yangon".to_string(), "Mandalay".to_string()])
        .apply(&table);
    assert!(!view.is_empty());

    let bytes = dataset::export_csv(view.rows()).unwrap();
    let reloaded = dataset::load(bytes.as_slice()).unwrap();
    let expected: Vec<Transaction> = view.rows().cloned().collect();
    assert_eq!(reloaded.rows(), expected.as_slice());
}

#[test]
fn amounts_at_the_load_ceiling_do_not_overflow_queries() {
    let header = "branch,city,customer_type,gender,product_line,unit_price,quantity,tax,total,date,time,payment,rating";
    let row = format!(
        "A,Yangon,Member,Female,Health and beauty,{max},1,{max},{max},2019-01-05,13:08,Cash,5\n",
        max = dataset::MAX_AMOUNT
    );
    let table = dataset::load(format!("{header}\n{}", row.repeat(1_000)).as_bytes()).unwrap();
    let view = FilteredView::all(&table);
    let expected = dataset::MAX_AMOUNT * dec!(1000);

    assert_eq!(kpis(&view).total_sales, expected);
    assert_eq!(group_sum(&view, Dimension::City)[0].value, expected);
    assert_eq!(monthly_trend(&view)[0].total, expected);
    assert_eq!(search(&view, SearchField::City, "Yangon").total_sales, expected);
    let report = AnalyticsEngine::new().report(&view);
    assert_eq!(report.insights.recent_sales, dataset::MAX_AMOUNT * dec!(30));
}

fn table_strategy() -> impl Strategy<Value = SalesTable> {
    let cities = prop::sample::select(vec!["Yangon", "Mandalay", "Naypyitaw"]);
    let row = (cities, 0u64..120, 1i64..100_000).prop_map(|(city, day, cents)| Transaction {
        branch: "A".to_string(),
        city: city.to_string(),
        customer_type: "Normal".to_string(),
        gender: "Male".to_string(),
        product_line: "Electronic accessories".to_string(),
        unit_price: Decimal::new(cents, 2),
        quantity: 1,
        tax: Decimal::ZERO,
        total: Decimal::new(cents, 2),
        date: date("2019-01-01") + Days::new(day),
        time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        payment: "Cash".to_string(),
        rating: dec!(5),
    });
    prop::collection::vec(row, 0..60).prop_map(SalesTable::new)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn date_filter_is_sound_and_complete(
        table in table_strategy(),
        start in 0u64..120,
        len in 0u64..60,
    ) {
        let start = date("2019-01-01") + Days::new(start);
        let end = start + Days::new(len);
        let view = filter_by_date(&table, start, end);

        prop_assert!(view.rows().all(|r| start <= r.date && r.date <= end));
        let expected = table.rows().iter().filter(|r| start <= r.date && r.date <= end).count();
        prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn inverted_ranges_are_empty(table in table_strategy(), start in 1u64..120, gap in 1u64..30) {
        let end = date("2019-01-01") + Days::new(start);
        let start = end + Days::new(gap);
        prop_assert!(filter_by_date(&table, start, end).is_empty());
    }

    #[test]
    fn city_groups_partition_total_sales(table in table_strategy()) {
        let view = FilteredView::all(&table);
        let grouped: Decimal = group_sum(&view, Dimension::City).iter().map(|g| g.value).sum();
        prop_assert_eq!(grouped, kpis(&view).total_sales);
    }

    #[test]
    fn trend_is_chronological(table in table_strategy()) {
        let trend = monthly_trend(&FilteredView::all(&table));
        prop_assert!(trend.windows(2).all(|w| w[0].month < w[1].month));
        prop_assert!(trend.iter().all(|m| m.total > Decimal::ZERO));
    }
}
