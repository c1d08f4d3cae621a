//! Built-in collections of the dashboard
//!
//! Each submodule exposes the collection `NAME`, its `schema()` and a small
//! `seed()` record set used by the demo server and tests.

pub mod contacts;
pub mod groups;
pub mod products;

use crate::core::schema::CollectionSchema;

/// Schemas of every built-in collection
pub fn builtin_schemas() -> Vec<CollectionSchema> {
    vec![contacts::schema(), products::schema(), groups::schema()]
}
