//! Row builders shared by the unit tests.

use chrono::{NaiveDate, NaiveTime};
use core_types::Transaction;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// A plain sale; override fields with struct update syntax.
pub(crate) fn sale() -> Transaction {
    Transaction {
        branch: "A".to_string(),
        city: "Yangon".to_string(),
        customer_type: "Member".to_string(),
        gender: "Female".to_string(),
        product_line: "Health and beauty".to_string(),
        unit_price: dec!(10),
        quantity: 1,
        tax: dec!(0.5),
        total: dec!(10.5),
        date: date("2019-01-05"),
        time: NaiveTime::from_hms_opt(13, 8, 0).unwrap(),
        payment: "Ewallet".to_string(),
        rating: dec!(7),
    }
}

pub(crate) fn sale_on(day: &str, total: Decimal) -> Transaction {
    Transaction {
        date: date(day),
        total,
        ..sale()
    }
}
