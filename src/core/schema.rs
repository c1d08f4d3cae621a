//! Collection schemas: the field descriptors and defaults of one list view

use crate::core::field::{FieldDescriptor, FieldKind};
use crate::core::query::SortDirection;
use serde::{Deserialize, Serialize};

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

/// Describes one record collection (e.g. contacts, products)
///
/// The schema drives query normalization (which fields may be searched,
/// ranged, filtered and sorted on) and mutation validation.
///
/// # YAML
///
/// ```yaml
/// name: products
/// default_sort: name
/// category_field: category
/// fields:
///   - { name: name, kind: text, searchable: true, required: true }
///   - { name: price, kind: numeric, required: true }
///   - { name: category, kind: categorical }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Collection name, also the REST path segment
    pub name: String,

    pub fields: Vec<FieldDescriptor>,

    /// Sort field used when a query names none or an unknown one
    pub default_sort: String,

    #[serde(default)]
    pub default_direction: SortDirection,

    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Field targeted by a bare `category=` filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_field: Option<String>,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>, default_sort: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            default_sort: default_sort.into(),
            default_direction: SortDirection::Ascending,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            category_field: None,
        }
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn with_category_field(mut self, field: impl Into<String>) -> Self {
        self.category_field = Some(field.into());
        self
    }

    pub fn with_page_size(mut self, default: usize, max: usize) -> Self {
        self.default_page_size = default;
        self.max_page_size = max;
        self
    }

    pub fn with_default_direction(mut self, direction: SortDirection) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.descriptor(name).map(|f| f.kind)
    }

    /// Names of the fields free-text search looks at, in declaration order
    pub fn search_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.name.clone())
            .collect()
    }

    /// Kind of the default sort field, text when the schema is inconsistent
    pub fn default_sort_kind(&self) -> FieldKind {
        self.kind_of(&self.default_sort).unwrap_or(FieldKind::Text)
    }
}
