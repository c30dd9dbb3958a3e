use crate::error::DatasetError;
use csv::StringRecord;

/// A column of the canonical sales schema. Declaration order is export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Branch,
    City,
    CustomerType,
    Gender,
    ProductLine,
    UnitPrice,
    Quantity,
    Tax,
    Total,
    Date,
    Time,
    Payment,
    Rating,
}

const COLUMN_COUNT: usize = 13;

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Branch,
        Column::City,
        Column::CustomerType,
        Column::Gender,
        Column::ProductLine,
        Column::UnitPrice,
        Column::Quantity,
        Column::Tax,
        Column::Total,
        Column::Date,
        Column::Time,
        Column::Payment,
        Column::Rating,
    ];

    /// The canonical header name, as written on export.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Branch => "branch",
            Column::City => "city",
            Column::CustomerType => "customer_type",
            Column::Gender => "gender",
            Column::ProductLine => "product_line",
            Column::UnitPrice => "unit_price",
            Column::Quantity => "quantity",
            Column::Tax => "tax",
            Column::Total => "total",
            Column::Date => "date",
            Column::Time => "time",
            Column::Payment => "payment",
            Column::Rating => "rating",
        }
    }

    /// Other normalized header names accepted for this column.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            // The public supermarket dataset labels its tax column "Tax 5%".
            Column::Tax => &["tax_5%"],
            _ => &[],
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        self.name() == normalized || self.aliases().contains(&normalized)
    }
}

/// Normalizes a raw header cell: trimmed, lowercased, spaces replaced by underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Positions of every canonical column within a source's header row.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    positions: [usize; COLUMN_COUNT],
    ignored: Vec<String>,
}

impl ColumnMap {
    /// Resolves every canonical column against the header row.
    ///
    /// All missing columns are reported together. When a header appears twice the first
    /// occurrence wins.
    pub(crate) fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut positions = [0usize; COLUMN_COUNT];
        let mut missing = Vec::new();
        for column in Column::ALL {
            match normalized.iter().position(|h| column.matches(h)) {
                Some(index) => positions[column as usize] = index,
                None => missing.push(column.name().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(DatasetError::Schema { missing });
        }

        let ignored = normalized
            .iter()
            .enumerate()
            .filter(|(index, _)| !positions.contains(index))
            .map(|(_, header)| header.clone())
            .collect();

        Ok(Self { positions, ignored })
    }

    /// Headers present in the source that are not part of the canonical schema.
    pub(crate) fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// The raw cell of `column` in `record`. Short records yield an empty cell.
    pub(crate) fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        record.get(self.positions[column as usize]).unwrap_or("")
    }
}
