use crate::error::CoreError;
use crate::structs::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A categorical column that rows can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Branch,
    City,
    CustomerType,
    Gender,
    ProductLine,
    Payment,
}

impl Dimension {
    /// The dimensions the dashboard breaks sales down by.
    pub const DASHBOARD: [Dimension; 5] = [
        Dimension::ProductLine,
        Dimension::City,
        Dimension::Gender,
        Dimension::CustomerType,
        Dimension::Payment,
    ];

    /// The normalized header name of the column.
    pub fn column_name(&self) -> &'static str {
        match self {
            Dimension::Branch => "branch",
            Dimension::City => "city",
            Dimension::CustomerType => "customer_type",
            Dimension::Gender => "gender",
            Dimension::ProductLine => "product_line",
            Dimension::Payment => "payment",
        }
    }

    /// Returns the stored category value of this dimension for a row.
    pub fn value_of<'a>(&self, row: &'a Transaction) -> &'a str {
        match self {
            Dimension::Branch => &row.branch,
            Dimension::City => &row.city,
            Dimension::CustomerType => &row.customer_type,
            Dimension::Gender => &row.gender,
            Dimension::ProductLine => &row.product_line,
            Dimension::Payment => &row.payment,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "branch" => Ok(Dimension::Branch),
            "city" => Ok(Dimension::City),
            "customer_type" => Ok(Dimension::CustomerType),
            "gender" => Ok(Dimension::Gender),
            "product_line" => Ok(Dimension::ProductLine),
            "payment" => Ok(Dimension::Payment),
            _ => Err(CoreError::InvalidInput("dimension".to_string(), s.to_string())),
        }
    }
}

/// The dimensions a user can look up a single value in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    City,
    ProductLine,
}

impl SearchField {
    pub fn dimension(&self) -> Dimension {
        match self {
            SearchField::City => Dimension::City,
            SearchField::ProductLine => Dimension::ProductLine,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dimension().fmt(f)
    }
}

impl FromStr for SearchField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "city" => Ok(SearchField::City),
            "product_line" => Ok(SearchField::ProductLine),
            _ => Err(CoreError::InvalidInput("search field".to_string(), s.to_string())),
        }
    }
}

/// The numeric columns of a row. Correlation is computed over exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    UnitPrice,
    Quantity,
    Tax,
    Total,
    Rating,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::UnitPrice,
        NumericColumn::Quantity,
        NumericColumn::Tax,
        NumericColumn::Total,
        NumericColumn::Rating,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            NumericColumn::UnitPrice => "unit_price",
            NumericColumn::Quantity => "quantity",
            NumericColumn::Tax => "tax",
            NumericColumn::Total => "total",
            NumericColumn::Rating => "rating",
        }
    }

    pub fn value_of(&self, row: &Transaction) -> Decimal {
        match self {
            NumericColumn::UnitPrice => row.unit_price,
            NumericColumn::Quantity => Decimal::from(row.quantity),
            NumericColumn::Tax => row.tax,
            NumericColumn::Total => row.total,
            NumericColumn::Rating => row.rating,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Accepts `product_line`, `product-line` and `Product line` alike.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}
