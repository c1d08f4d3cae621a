//! Facet counts: distinct values of a categorical field

use crate::core::record::Record;
use indexmap::IndexMap;
use serde::Serialize;

/// One distinct value and how many records carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub value: String,
    pub count: usize,
}

/// Count distinct natural-text values of `field`, in first-seen order
///
/// Records where the field is missing or null are skipped.
pub fn facets<'a, I>(records: I, field: &str) -> Vec<Facet>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        if let Some(value) = record.text(field) {
            *counts.entry(value.into_owned()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(value, count)| Facet { value, count })
        .collect()
}
