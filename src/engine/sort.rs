//! Comparator sort: stable, direction-aware, missing values last

use crate::core::field::FieldKind;
use crate::core::query::{QueryDescriptor, SortKey};
use crate::core::record::Record;
use std::cmp::Ordering;

/// Order records by the query's sort key, then its tie-breakers
///
/// The sort is stable: records that compare equal on every key keep their
/// input order. The input is not modified.
pub fn sort<'a>(records: &[&'a Record], query: &QueryDescriptor) -> Vec<&'a Record> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| {
        std::iter::once(&query.sort)
            .chain(&query.then_by)
            .map(|key| compare(a, b, key))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    ordered
}

/// Compare two records on one key
///
/// Direction flips the comparison of present values only; records missing a
/// usable value (absent, null, NaN or non-numeric for numeric keys) always
/// sort after the rest.
pub fn compare(a: &Record, b: &Record, key: &SortKey) -> Ordering {
    match key.kind {
        FieldKind::Numeric => present_first(
            a.number(&key.field),
            b.number(&key.field),
            // NaN is already filtered out, and -0.0 equals 0.0
            |x, y| key.direction.apply(x.partial_cmp(y).unwrap_or(Ordering::Equal)),
        ),
        FieldKind::Text | FieldKind::Categorical => present_first(
            a.text(&key.field),
            b.text(&key.field),
            |x, y| key.direction.apply(x.cmp(y)),
        ),
    }
}

fn present_first<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
