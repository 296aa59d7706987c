use std::cmp::Ordering;

use crate::domain::entities::dataset::{locale_compare, Scalar, StockRecord};
use crate::domain::entities::query::{SortConfig, SortDirection};

/// Numeric only when both sides are numbers; any other pairing (blank, text, missing)
/// compares string forms.
pub fn compare_values(left: Option<&Scalar>, right: Option<&Scalar>) -> Ordering {
    match (
        left.and_then(Scalar::as_number),
        right.and_then(Scalar::as_number),
    ) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => {
            let a = left.map(Scalar::to_string).unwrap_or_default();
            let b = right.map(Scalar::to_string).unwrap_or_default();
            locale_compare(&a, &b)
        }
    }
}

pub fn sort_records(records: &[StockRecord], sort: Option<&SortConfig>) -> Vec<StockRecord> {
    let Some(sort) = sort else {
        return records.to_vec();
    };

    merge_sort_by(records.to_vec(), &|a: &StockRecord, b: &StockRecord| {
        let ordering = compare_values(a.get(&sort.key), b.get(&sort.key));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    })
}

/// Stable merge sort. Mixed number/text columns make `compare_values` intransitive
/// (2 < 10 numerically, "10" < "1a" < "2" as text), which `slice::sort_by` may reject
/// with a panic; this one just produces some stable order.
fn merge_sort_by<T>(mut items: Vec<T>, compare: &impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => compare(b, a) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
