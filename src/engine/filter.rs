//! Predicate filter: text search, numeric ranges and category equality

use crate::core::query::{CategoryFilter, QueryDescriptor, RangeFilter};
use crate::core::record::Record;

/// Keep the records matching every active criterion, in input order
pub fn filter<'a>(records: &'a [Record], query: &QueryDescriptor) -> Vec<&'a Record> {
    let needle = query.search_text.to_lowercase();

    records
        .iter()
        .filter(|record| {
            matches_text(record, &needle, &query.search_fields)
                && query
                    .range_filters
                    .iter()
                    .all(|(field, range)| matches_range(record, field, range))
                && query
                    .category_filter
                    .as_ref()
                    .is_none_or(|category| matches_category(record, category))
        })
        .collect()
}

/// True when `needle` (already lowercased) is empty or occurs in any search field
pub fn matches_text(record: &Record, needle: &str, fields: &[String]) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .text(field)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Missing and non-numeric values fail the range
pub fn matches_range(record: &Record, field: &str, range: &RangeFilter) -> bool {
    record
        .number(field)
        .is_some_and(|value| range.contains(value))
}

pub fn matches_category(record: &Record, category: &CategoryFilter) -> bool {
    record
        .text(&category.field)
        .is_some_and(|text| text == category.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldKind, FieldValue};
    use crate::core::query::SortKey;

    fn records() -> Vec<Record> {
        vec![
            Record::new()
                .with("name", "Ann")
                .with("price", 10.0)
                .with("category", "Electronics"),
            Record::new()
                .with("name", "Bo")
                .with("price", 5.0)
                .with("category", "Accessories"),
            Record::new()
                .with("name", "Cy")
                .with("price", "five")
                .with("category", "electronics"),
            Record::new().with("name", "Dee"),
        ]
    }

    fn query() -> QueryDescriptor {
        QueryDescriptor::new(SortKey::asc("name", FieldKind::Text))
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.text("name").unwrap_or_default().into_owned())
            .collect()
    }

    #[test]
    fn test_no_criteria_keeps_everything_in_order() {
        let records = records();
        assert_eq!(names(&filter(&records, &query())), ["Ann", "Bo", "Cy", "Dee"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter(&[], &query().with_search("x", ["name"])).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = records();
        let q = query().with_search("AN", ["name"]);
        assert_eq!(names(&filter(&records, &q)), ["Ann"]);
    }

    #[test]
    fn test_search_any_designated_field() {
        let records = vec![
            Record::new()
                .with("name", "John Doe")
                .with("phone_number", "9876543210"),
            Record::new()
                .with("name", "Jane Smith")
                .with("phone_number", "8765432109"),
        ];
        let q = query().with_search("9876", ["name", "phone_number"]);
        assert_eq!(names(&filter(&records, &q)), ["John Doe"]);
    }

    #[test]
    fn test_search_ignores_undesignated_fields() {
        let records = records();
        let q = query().with_search("electronics", ["name"]);
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_search_matches_number_text() {
        let records = records();
        let q = query().with_search("10", ["price"]);
        assert_eq!(names(&filter(&records, &q)), ["Ann"]);
    }

    #[test]
    fn test_range_is_inclusive_and_fails_closed() {
        let records = records();
        let q = query().with_range("price", RangeFilter::between(5.0, 10.0));
        assert_eq!(names(&filter(&records, &q)), ["Ann", "Bo"]);

        let q = query().with_range("price", RangeFilter::at_most(5.0));
        assert_eq!(names(&filter(&records, &q)), ["Bo"]);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let records = records();
        let q = query().with_range("price", RangeFilter::between(10.0, 5.0));
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_range_on_absent_field_excludes() {
        let records = records();
        let q = query().with_range("stock", RangeFilter::at_least(0.0));
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let records = records();
        let q = query().with_category("category", "Electronics");
        assert_eq!(names(&filter(&records, &q)), ["Ann"]);
    }

    #[test]
    fn test_category_null_fails() {
        let records = vec![Record::new().with("name", "Ann").with("category", FieldValue::Null)];
        let q = query().with_category("category", "");
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let records = records();
        let q = query()
            .with_search("n", ["name"])
            .with_range("price", RangeFilter::at_least(1.0))
            .with_category("category", "Electronics");
        assert_eq!(names(&filter(&records, &q)), ["Ann"]);
    }
}
