//! Query descriptors, normalization and pagination wire types
//!
//! A [`RawQuery`] is what a user typed: every value is an unvalidated string.
//! [`normalize`] turns it into a [`QueryDescriptor`] against a
//! [`CollectionSchema`], failing closed: anything unparseable or unknown is
//! dropped or replaced by a schema default, never reported as an error.
//!
//! # HTTP form
//!
//! ```text
//! GET /products?search=lamp&min_price=10&max_price=50&category=Electronics
//! GET /products?sort=price:desc,name&page=2&limit=20
//! GET /contacts?q=john&sort=created_at&order=desc
//! ```

use crate::core::field::FieldKind;
use crate::core::schema::CollectionSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Applies this direction to an ascending ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Parse a user-supplied direction
    ///
    /// Returns `None` for a blank input. Unrecognized words fall back to
    /// ascending.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match input.to_ascii_lowercase().as_str() {
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => Some(SortDirection::Ascending),
        }
    }
}

/// One sort key: field, comparison kind and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub kind: FieldKind,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, kind: FieldKind, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            kind,
            direction,
        }
    }

    pub fn asc(field: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(field, kind, SortDirection::Ascending)
    }

    pub fn desc(field: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(field, kind, SortDirection::Descending)
    }
}

/// Inclusive numeric bounds; an absent bound is unbounded on that side
///
/// `min > max` is representable and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Exact-match, case-sensitive equality filter on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFilter {
    pub field: String,
    pub value: String,
}

impl CategoryFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// The normalized set of filter, sort and page parameters for one engine run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    /// Substring searched case-insensitively; empty disables text matching
    pub search_text: String,

    /// Fields the search text is matched against
    pub search_fields: Vec<String>,

    pub range_filters: BTreeMap<String, RangeFilter>,

    pub category_filter: Option<CategoryFilter>,

    pub sort: SortKey,

    /// Tie-breakers applied in order after `sort`
    pub then_by: Vec<SortKey>,

    /// Requested page, starting at 1
    pub page: usize,

    pub page_size: usize,
}

impl QueryDescriptor {
    /// A query with no filters, the given sort, page 1 and 10 items per page
    pub fn new(sort: SortKey) -> Self {
        Self {
            search_text: String::new(),
            search_fields: Vec::new(),
            range_filters: BTreeMap::new(),
            category_filter: None,
            sort,
            then_by: Vec::new(),
            page: 1,
            page_size: 10,
        }
    }

    pub fn with_search<I, S>(mut self, text: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_text = text.into();
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, field: impl Into<String>, range: RangeFilter) -> Self {
        self.range_filters.insert(field.into(), range);
        self
    }

    pub fn with_category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.category_filter = Some(CategoryFilter::new(field, value));
        self
    }

    pub fn then_by(mut self, key: SortKey) -> Self {
        self.then_by.push(key);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Whether any record-narrowing criterion is active
    pub fn has_filters(&self) -> bool {
        !self.search_text.is_empty()
            || !self.range_filters.is_empty()
            || self.category_filter.is_some()
    }
}

/// Raw, user-typed range bounds
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRange {
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

/// Raw category selection; `field` defaults to the schema's category field
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub field: Option<String>,
    pub value: String,
}

/// Query parameters exactly as typed by a user, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawQuery {
    pub search: Option<String>,
    pub ranges: BTreeMap<String, RawRange>,
    pub category: Option<RawCategory>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    /// Secondary sort keys as `(field, direction)`
    pub then_by: Vec<(String, Option<String>)>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn min(mut self, field: impl Into<String>, bound: impl Into<String>) -> Self {
        self.ranges.entry(field.into()).or_default().min = Some(bound.into());
        self
    }

    pub fn max(mut self, field: impl Into<String>, bound: impl Into<String>) -> Self {
        self.ranges.entry(field.into()).or_default().max = Some(bound.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(RawCategory {
            field: None,
            value: value.into(),
        });
        self
    }

    pub fn category_on(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.category = Some(RawCategory {
            field: Some(field.into()),
            value: value.into(),
        });
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = Some(direction.into());
        self
    }

    pub fn then_sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.then_by.push((field.into(), Some(direction.into())));
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn page_size(mut self, page_size: impl Into<String>) -> Self {
        self.page_size = Some(page_size.into());
        self
    }

    /// Parse the HTTP query-string form
    ///
    /// Recognized keys: `search` (or `q`), `sort` (`field[:dir]`, comma
    /// separated), `order`, `page`, `limit` (or `page_size`), `category`,
    /// `category.<field>`, `min_<field>` and `max_<field>`. Other keys are
    /// ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut raw = RawQuery {
            search: params.get("search").or_else(|| params.get("q")).cloned(),
            page: params.get("page").cloned(),
            page_size: params
                .get("limit")
                .or_else(|| params.get("page_size"))
                .cloned(),
            ..Default::default()
        };

        if let Some(sort) = params.get("sort") {
            let mut keys = sort
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(split_sort_key);

            if let Some((field, direction)) = keys.next() {
                raw.sort_field = Some(field);
                raw.sort_direction = direction;
            }
            raw.then_by = keys.collect();
        }

        if let Some(order) = params.get("order") {
            raw.sort_direction = Some(order.clone());
        }

        // Qualified `category.<field>` wins over the bare form; ties resolve by field name
        let mut qualified: Vec<(&str, &String)> = params
            .iter()
            .filter_map(|(k, v)| k.strip_prefix("category.").map(|field| (field, v)))
            .collect();
        qualified.sort_by(|a, b| a.0.cmp(b.0));

        raw.category = match qualified.first() {
            Some((field, value)) => Some(RawCategory {
                field: Some((*field).to_string()),
                value: (*value).clone(),
            }),
            None => params.get("category").map(|value| RawCategory {
                field: None,
                value: value.clone(),
            }),
        };

        for (key, value) in params {
            if let Some(field) = key.strip_prefix("min_") {
                raw.ranges.entry(field.to_string()).or_default().min = Some(value.clone());
            } else if let Some(field) = key.strip_prefix("max_") {
                raw.ranges.entry(field.to_string()).or_default().max = Some(value.clone());
            }
        }

        raw
    }
}

fn split_sort_key(key: &str) -> (String, Option<String>) {
    match key.split_once(':') {
        Some((field, direction)) => (field.trim().to_string(), Some(direction.to_string())),
        None => (key.to_string(), None),
    }
}

/// Parse a range bound; anything that is not a finite number counts as absent
fn parse_bound(input: Option<&str>) -> Option<f64> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

fn parse_positive(input: Option<&str>) -> Option<usize> {
    input
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Normalize a raw query against a collection schema
///
/// Never fails: blank search becomes empty, unparseable bounds and unknown
/// fields are dropped, an unknown sort field falls back to the schema default
/// and page parameters fall back to 1 and the schema page size.
pub fn normalize(raw: &RawQuery, schema: &CollectionSchema) -> QueryDescriptor {
    let search_text = match raw.search.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => String::new(),
    };

    let range_filters = raw
        .ranges
        .iter()
        .filter_map(|(field, bounds)| {
            if schema.kind_of(field) != Some(FieldKind::Numeric) {
                tracing::debug!(field = %field, "dropping range on unknown or non-numeric field");
                return None;
            }
            let range = RangeFilter {
                min: parse_bound(bounds.min.as_deref()),
                max: parse_bound(bounds.max.as_deref()),
            };
            (!range.is_unbounded()).then(|| (field.clone(), range))
        })
        .collect();

    let category_filter = raw.category.as_ref().and_then(|category| {
        if category.value.trim().is_empty() {
            return None;
        }
        let field = category
            .field
            .as_deref()
            .or(schema.category_field.as_deref())?;
        let descriptor = schema.descriptor(field)?;
        Some(CategoryFilter::new(&descriptor.name, &category.value))
    });

    let direction = raw.sort_direction.as_deref().and_then(SortDirection::parse);
    let sort = match raw.sort_field.as_deref().and_then(|f| schema.descriptor(f.trim())) {
        Some(descriptor) => SortKey::new(
            &descriptor.name,
            descriptor.kind,
            direction.unwrap_or_default(),
        ),
        None => SortKey::new(
            &schema.default_sort,
            schema.default_sort_kind(),
            direction.unwrap_or(schema.default_direction),
        ),
    };

    let mut then_by: Vec<SortKey> = Vec::new();
    for (field, direction) in &raw.then_by {
        let Some(descriptor) = schema.descriptor(field.trim()) else {
            continue;
        };
        if descriptor.name == sort.field || then_by.iter().any(|k| k.field == descriptor.name) {
            continue;
        }
        then_by.push(SortKey::new(
            &descriptor.name,
            descriptor.kind,
            direction
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default(),
        ));
    }

    let page = parse_positive(raw.page.as_deref()).unwrap_or(1);
    let page_size = parse_positive(raw.page_size.as_deref())
        .unwrap_or(schema.default_page_size)
        .min(schema.max_page_size)
        .max(1);

    QueryDescriptor {
        search_text,
        search_fields: schema.search_fields(),
        range_filters,
        category_filter,
        sort,
        then_by,
        page,
        page_size,
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1, already clamped)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit and page are at least 1 to avoid division by zero and underflow
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}
