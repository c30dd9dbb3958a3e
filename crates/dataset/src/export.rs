use crate::error::DatasetError;
use crate::schema::Column;
use core_types::Transaction;
use std::io::Write;

/// Date layout used on export. Unambiguous and accepted by the loader.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const EXPORT_TIME_FORMAT: &str = "%H:%M:%S";

/// Writes `rows` as comma-delimited CSV with the canonical header, in iteration order.
///
/// Decimals keep the scale they were loaded with, so `548.9715` is written back as
/// `548.9715`. Returns the number of data rows written.
pub fn write_csv<'a, W, I>(rows: I, writer: W) -> Result<usize, DatasetError>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(Column::ALL.iter().map(Column::name))?;

    let mut written = 0;
    for row in rows {
        writer.write_record(Column::ALL.iter().map(|column| cell(row, *column)))?;
        written += 1;
    }
    writer.flush()?;

    tracing::debug!(rows = written, "Rows exported as CSV.");
    Ok(written)
}

/// Serializes `rows` into an in-memory CSV byte stream.
pub fn export_csv<'a, I>(rows: I) -> Result<Vec<u8>, DatasetError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(buffer)
}

fn cell(row: &Transaction, column: Column) -> String {
    match column {
        Column::Branch => row.branch.clone(),
        Column::City => row.city.clone(),
        Column::CustomerType => row.customer_type.clone(),
        Column::Gender => row.gender.clone(),
        Column::ProductLine => row.product_line.clone(),
        Column::UnitPrice => row.unit_price.to_string(),
        Column::Quantity => row.quantity.to_string(),
        Column::Tax => row.tax.to_string(),
        Column::Total => row.total.to_string(),
        Column::Date => row.date.format(EXPORT_DATE_FORMAT).to_string(),
        Column::Time => row.time.format(EXPORT_TIME_FORMAT).to_string(),
        Column::Payment => row.payment.clone(),
        Column::Rating => row.rating.to_string(),
    }
}
