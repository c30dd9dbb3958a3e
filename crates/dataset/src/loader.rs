use crate::error::DatasetError;
use crate::schema::{Column, ColumnMap};
use chrono::{NaiveDate, NaiveTime};
use core_types::{SalesTable, Transaction};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Date layouts accepted on input. ISO first, then the US layout of the public dataset.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Upper bound for `unit_price`, `tax` and `total`. Sums over any realistic table stay far
/// below `Decimal::MAX`, so query-time accumulation cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Most fractional digits a `Decimal` holds without rounding.
const MAX_FRACTION_DIGITS: usize = 28;

/// Loads the dataset file at `path`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_path(path: &Path) -> Result<SalesTable, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load(file)
}

/// Reads a delimited source with a header row into a typed `SalesTable`.
///
/// Header names are matched after normalization, so `Customer type` and `customer_type` are
/// the same column. Columns outside the schema are ignored. The first row that fails to parse
/// aborts the load.
pub fn load<R: Read>(source: R) -> Result<SalesTable, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let columns = ColumnMap::resolve(reader.headers()?)?;
    if !columns.ignored().is_empty() {
        tracing::debug!(ignored = ?columns.ignored(), "Ignoring columns outside the sales schema.");
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(parse_row(&columns, &record, index + 1)?);
    }

    tracing::info!(rows = rows.len(), "Sales dataset loaded.");
    Ok(SalesTable::new(rows))
}

/// Builds one `Transaction` from a record. `row` is 1-based and excludes the header.
fn parse_row(
    columns: &ColumnMap,
    record: &StringRecord,
    row: usize,
) -> Result<Transaction, DatasetError> {
    let field = |column: Column| RawField {
        row,
        column,
        value: columns.cell(record, column),
    };

    let unit_price = field(Column::UnitPrice).decimal()?;
    let quantity = field(Column::Quantity).quantity()?;
    let tax = field(Column::Tax).decimal()?;
    let total = field(Column::Total).decimal()?;
    let rating = field(Column::Rating).decimal()?;

    field(Column::UnitPrice).check(unit_price > Decimal::ZERO, "must be positive")?;
    field(Column::Tax).check(tax >= Decimal::ZERO, "must not be negative")?;
    field(Column::Total).check(total >= Decimal::ZERO, "must not be negative")?;
    for (column, amount) in [
        (Column::UnitPrice, unit_price),
        (Column::Tax, tax),
        (Column::Total, total),
    ] {
        field(column).check(amount <= MAX_AMOUNT, "exceeds 1000000000000000")?;
    }
    field(Column::Rating).check(
        rating >= Decimal::ZERO && rating <= Decimal::TEN,
        "must be between 0 and 10",
    )?;

    Ok(Transaction {
        branch: field(Column::Branch).text()?,
        city: field(Column::City).text()?,
        customer_type: field(Column::CustomerType).text()?,
        gender: field(Column::Gender).text()?,
        product_line: field(Column::ProductLine).text()?,
        unit_price,
        quantity,
        tax,
        total,
        date: field(Column::Date).date()?,
        time: field(Column::Time).time()?,
        payment: field(Column::Payment).text()?,
        rating,
    })
}

/// A single raw cell together with where it came from, for error reporting.
struct RawField<'r> {
    row: usize,
    column: Column,
    value: &'r str,
}

impl RawField<'_> {
    fn parse_error(&self, reason: impl ToString) -> DatasetError {
        DatasetError::Parse {
            row: self.row,
            column: self.column.name(),
            value: self.value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn check(&self, holds: bool, reason: &str) -> Result<(), DatasetError> {
        if holds {
            return Ok(());
        }
        Err(DatasetError::InvalidValue {
            row: self.row,
            column: self.column.name(),
            value: self.value.to_string(),
            reason: reason.to_string(),
        })
    }

    /// Category values are kept verbatim, surrounding whitespace included.
    fn text(&self) -> Result<String, DatasetError> {
        if self.value.trim().is_empty() {
            return Err(self.parse_error("missing value"));
        }
        Ok(self.value.to_string())
    }

    fn decimal(&self) -> Result<Decimal, DatasetError> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return Err(self.parse_error("missing value"));
        }
        if raw.contains('_') {
            return Err(self.parse_error("digit separators are not allowed"));
        }
        let mantissa = raw.split(['e', 'E']).next().unwrap_or(raw);
        let fraction_digits = mantissa.split_once('.').map_or(0, |(_, f)| f.len());
        if fraction_digits > MAX_FRACTION_DIGITS {
            return Err(self.parse_error("more than 28 fractional digits"));
        }
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|e| self.parse_error(e))
    }

    fn quantity(&self) -> Result<u32, DatasetError> {
        let quantity = self
            .value
            .trim()
            .parse::<u32>()
            .map_err(|e| self.parse_error(e))?;
        self.check(quantity > 0, "must be positive")?;
        Ok(quantity)
    }

    fn date(&self) -> Result<NaiveDate, DatasetError> {
        let raw = self.value.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
            .ok_or_else(|| self.parse_error("expected YYYY-MM-DD or M/D/YYYY"))
    }

    fn time(&self) -> Result<NaiveTime, DatasetError> {
        let raw = self.value.trim();
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
            .ok_or_else(|| self.parse_error("expected HH:MM or HH:MM:SS"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "branch,city,customer_type,gender,product_line,unit_price,quantity,tax,total,date,time,payment,rating";

    fn load_str(body: &str) -> Result<SalesTable, DatasetError> {
        load(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn parses_a_typed_row() {
        let table = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,1/5/2019,13:08,Ewallet,9.1\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.city, "Yangon");
        assert_eq!(row.unit_price, dec!(74.69));
        assert_eq!(row.quantity, 7);
        assert_eq!(row.total, dec!(548.9715));
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
        assert_eq!(row.time, NaiveTime::from_hms_opt(13, 8, 0).unwrap());
        assert_eq!(row.rating, dec!(9.1));
    }

    #[test]
    fn header_only_source_is_an_empty_table() {
        let table = load_str("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn empty_source_is_a_schema_error() {
        let err = load("".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Schema { ref missing } if missing.len() == 13));
    }

    #[test]
    fn bad_date_fails_the_whole_load() {
        let err = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,2019-01-05,13:08,Ewallet,9.1\n\
             A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,not a date,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();

        match err {
            DatasetError::Parse { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "date");
                assert_eq!(value, "not a date");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_time_fails_the_whole_load() {
        let err = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,2019-01-05,13:08,Ewallet,9.1\n\
             A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,2019-01-06,25:99,Ewallet,9.1\n",
        )
        .unwrap_err();

        match err {
            DatasetError::Parse { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "time");
                assert_eq!(value, "25:99");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn amounts_above_the_ceiling_are_rejected() {
        let row = "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,50000000000000000000000000000,2019-01-05,13:08,Ewallet,9.1\n";
        let err = load_str(&row.repeat(2)).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { column: "total", row: 1, .. }));

        let price = load_str(
            "A,Yangon,Member,Female,Health and beauty,1000000000000000.01,7,26.1415,548.9715,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();
        assert!(matches!(price, DatasetError::InvalidValue { column: "unit_price", .. }));

        let at_ceiling = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,1000000000000000,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap();
        assert_eq!(at_ceiling.rows()[0].total, MAX_AMOUNT);
    }

    #[test]
    fn numbers_must_be_written_exactly() {
        let separators = load_str(
            "A,Yangon,Member,Female,Health and beauty,1_000,7,26.1415,548.9715,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();
        assert!(matches!(separators, DatasetError::Parse { column: "unit_price", .. }));

        let too_precise = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,1.00000000000000000000000000001,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();
        assert!(matches!(too_precise, DatasetError::Parse { column: "total", .. }));
    }

    #[test]
    fn non_numeric_total_is_a_parse_error() {
        let err = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,n/a,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Parse { column: "total", row: 1, .. }));
    }

    #[test]
    fn missing_category_is_a_parse_error() {
        let err = load_str(
            "A,,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Parse { column: "city", .. }));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let rating = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,2019-01-05,13:08,Ewallet,10.5\n",
        )
        .unwrap_err();
        assert!(matches!(rating, DatasetError::InvalidValue { column: "rating", .. }));

        let quantity = load_str(
            "A,Yangon,Member,Female,Health and beauty,74.69,0,26.1415,548.9715,2019-01-05,13:08,Ewallet,9.1\n",
        )
        .unwrap_err();
        assert!(matches!(quantity, DatasetError::InvalidValue { column: "quantity", .. }));
        assert_eq!(quantity.row(), Some(1));
    }

    #[test]
    fn ragged_record_is_a_csv_error() {
        let err = load_str("A,Yangon,Member\n").unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn total_is_read_as_stored() {
        // 10 * 2 + 1 != 99; the stored total wins.
        let table = load_str(
            "A,Yangon,Member,Female,Health and beauty,10,2,1,99,2019-01-05,13:08:00,Cash,5\n",
        )
        .unwrap();
        assert_eq!(table.rows()[0].total, dec!(99));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
