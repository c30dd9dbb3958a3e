use crate::view::FilteredView;
use core_types::Dimension;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A dimension value and a decimal measure (sum or mean of `total`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: Decimal,
}

/// A dimension value and the number of rows carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// A dimension value and its percentage of the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupShare {
    pub key: String,
    pub percent: Decimal,
}

/// Per-value sum and row count, keyed in ascending value order.
fn accumulate<'a>(view: &FilteredView<'a>, dimension: Dimension) -> BTreeMap<&'a str, (Decimal, usize)> {
    let mut groups: BTreeMap<&'a str, (Decimal, usize)> = BTreeMap::new();
    for row in view.rows() {
        let entry = groups
            .entry(dimension.value_of(row))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += row.total;
        entry.1 += 1;
    }
    groups
}

/// Largest measure first; equal measures fall back to ascending key.
fn by_measure_desc<T: Ord>(a: (&T, &str), b: (&T, &str)) -> Ordering {
    b.0.cmp(a.0).then_with(|| a.1.cmp(b.1))
}

fn ranked(mut groups: Vec<GroupTotal>) -> Vec<GroupTotal> {
    groups.sort_by(|a, b| by_measure_desc((&a.value, a.key.as_str()), (&b.value, b.key.as_str())));
    groups
}

/// Sum of `total` per value of `dimension`, highest first.
///
/// The groups partition the view: their values add up to the view's total sales.
pub fn group_sum(view: &FilteredView<'_>, dimension: Dimension) -> Vec<GroupTotal> {
    ranked(
        accumulate(view, dimension)
            .into_iter()
            .map(|(key, (sum, _))| GroupTotal {
                key: key.to_string(),
                value: sum,
            })
            .collect(),
    )
}

/// Mean of `total` per value of `dimension`, highest first.
pub fn group_mean(view: &FilteredView<'_>, dimension: Dimension) -> Vec<GroupTotal> {
    ranked(
        accumulate(view, dimension)
            .into_iter()
            .map(|(key, (sum, count))| GroupTotal {
                key: key.to_string(),
                value: sum / Decimal::from(count),
            })
            .collect(),
    )
}

/// Number of rows per value of `dimension`, most frequent first.
pub fn group_count(view: &FilteredView<'_>, dimension: Dimension) -> Vec<GroupCount> {
    let mut counts: Vec<GroupCount> = accumulate(view, dimension)
        .into_iter()
        .map(|(key, (_, count))| GroupCount {
            key: key.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| by_measure_desc((&a.count, a.key.as_str()), (&b.count, b.key.as_str())));
    counts
}

/// Each group's percentage of the grand total, rounded to two places, in input order.
///
/// Empty when there is nothing to divide, i.e. no groups or a zero grand total.
pub fn shares(groups: &[GroupTotal]) -> Vec<GroupShare> {
    let grand_total: Decimal = groups.iter().map(|g| g.value).sum();
    if grand_total.is_zero() {
        return Vec::new();
    }
    groups
        .iter()
        .map(|g| GroupShare {
            key: g.key.clone(),
            percent: (g.value / grand_total * Decimal::ONE_HUNDRED).round_dp(2),
        })
        .collect()
}
