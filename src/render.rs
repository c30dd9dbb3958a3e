use analytics::{
    Correlation, DashboardReport, FilteredView, GroupCount, GroupShare, GroupTotal, SearchResult,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Row, Table};
use core_types::{Dimension, SearchField};
use rust_decimal::Decimal;

fn new_table(header: impl Into<Row>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(value: Decimal) -> String {
    format!("${:.2}", value)
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn title(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Branch => "Branch",
        Dimension::City => "City",
        Dimension::CustomerType => "Customer Type",
        Dimension::Gender => "Gender",
        Dimension::ProductLine => "Product Line",
        Dimension::Payment => "Payment",
    }
}

/// Prints every dashboard section for a view.
pub fn summary(view: &FilteredView<'_>, report: &DashboardReport, preview_rows: usize) {
    if !report.kpis.has_data {
        println!("No transactions match the current filters.");
        return;
    }

    println!("Preview of Filtered Data");
    let mut preview = new_table(vec!["Date", "Time", "Branch", "City", "Product Line", "Total", "Rating"]);
    for row in view.head(preview_rows) {
        preview.add_row(vec![
            Cell::new(row.date),
            Cell::new(row.time.format("%H:%M")),
            Cell::new(&row.branch),
            Cell::new(&row.city),
            Cell::new(&row.product_line),
            right(money(row.total)),
            right(row.rating.to_string()),
        ]);
    }
    println!("{preview}");

    if let Some(span) = report.date_span {
        println!("Data from {} to {}\n", span.first, span.last);
    }

    let mut kpis = new_table(vec!["Total Sales", "Average Rating", "Transactions"]);
    kpis.add_row(vec![
        right(money(report.kpis.total_sales)),
        right(format!("{:.2}", report.kpis.avg_rating)),
        right(report.kpis.transaction_count.to_string()),
    ]);
    println!("{kpis}");

    for dimension in Dimension::DASHBOARD {
        let shares: &[GroupShare] = match dimension {
            Dimension::ProductLine => &report.product_line_shares,
            Dimension::City => &report.city_shares,
            _ => &[],
        };
        println!("Sales by {}", title(dimension));
        println!("{}", breakdown(dimension, report.sales_by(dimension), shares));
    }

    println!("Payment Methods");
    counts(Dimension::Payment, &report.payment_counts);

    println!("Monthly Sales Trend");
    let mut trend = new_table(vec!["Month", "Total Sales"]);
    for bucket in &report.monthly_trend {
        trend.add_row(vec![Cell::new(bucket.month), right(money(bucket.total))]);
    }
    println!("{trend}");

    println!("Correlation");
    println!("{}", correlation(&report.correlation));

    let insights = &report.insights;
    println!("Quick Insights");
    if let Some(city) = &insights.top_city {
        println!("  Highest Sales City: {}", city.key);
    }
    if let Some(payment) = &insights.top_payment {
        println!("  Most Used Payment Method: {}", payment.key);
    }
    if let Some(product) = &insights.top_product_line {
        println!("  Highest Selling Product: {} ({})", product.key, money(product.value));
    }
    println!(
        "  Sales in Last {} Records: {}",
        insights.recent_window,
        money(insights.recent_sales)
    );
}

fn breakdown(dimension: Dimension, groups: &[GroupTotal], shares: &[GroupShare]) -> Table {
    let mut header = vec![title(dimension), "Total Sales"];
    if !shares.is_empty() {
        header.push("Share");
    }
    let mut table = new_table(header);
    for group in groups {
        let mut cells = vec![Cell::new(&group.key), right(money(group.value))];
        if let Some(share) = shares.iter().find(|s| s.key == group.key) {
            cells.push(right(format!("{}%", share.percent)));
        }
        table.add_row(cells);
    }
    table
}

/// Prints a single decimal breakdown, largest first.
pub fn totals(dimension: Dimension, measure: &str, groups: &[GroupTotal]) {
    let mut table = new_table(vec![title(dimension), measure]);
    for group in groups {
        table.add_row(vec![Cell::new(&group.key), right(money(group.value))]);
    }
    println!("{table}");
}

pub fn counts(dimension: Dimension, groups: &[GroupCount]) {
    let mut table = new_table(vec![title(dimension), "Transactions"]);
    for group in groups {
        table.add_row(vec![Cell::new(&group.key), right(group.count.to_string())]);
    }
    println!("{table}");
}

fn correlation(correlation: &Correlation) -> String {
    let matrix = match correlation {
        Correlation::InsufficientData { rows } => {
            return format!("Not enough data to correlate ({rows} row(s)).");
        }
        Correlation::Matrix(matrix) => matrix,
    };

    let mut header = vec![String::new()];
    header.extend(matrix.columns.iter().map(|c| c.to_string()));
    let mut table = new_table(header);
    for (column, coefficients) in matrix.columns.iter().zip(&matrix.coefficients) {
        let mut cells = vec![Cell::new(column)];
        cells.extend(coefficients.iter().map(|r| match r {
            Some(r) => right(format!("{r:.2}")),
            None => right("n/a".to_string()),
        }));
        table.add_row(cells);
    }
    table.to_string()
}

pub fn search(field: SearchField, value: &str, result: &SearchResult) {
    if result.matched_row_count == 0 {
        let label = match field {
            SearchField::City => "City",
            SearchField::ProductLine => "Product",
        };
        println!("{label} not found.");
        return;
    }
    println!(
        "Total sales for '{}': {} across {} transaction(s).",
        value,
        money(result.total_sales),
        result.matched_row_count
    );
}
