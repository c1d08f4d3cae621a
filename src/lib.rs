//! # deskview
//!
//! Collection view engine and record API for business dashboards.
//!
//! A dashboard list view (contacts, products, ...) is a record set plus a
//! query: free-text search, numeric range filters, an exact-match category
//! filter, a sort key and a page. deskview turns that into one page of
//! results, deterministically.
//!
//! ## Features
//!
//! - **Pure engine**: filter, stable sort and clamped pagination over borrowed records
//! - **Fail-closed normalization**: raw, user-typed parameters never produce an error
//! - **Schema-driven**: collections are described by field descriptors, in code or YAML
//! - **Record services**: async load and mutate traits with an in-memory implementation
//! - **REST exposure**: list, CRUD, toggle and facet routes per collection via axum
//!
//! ## Quick Start
//!
//! ```rust
//! use deskview::prelude::*;
//!
//! let schema = products::schema();
//! let records = products::seed();
//!
//! let raw = RawQuery::new().search("case").sort("price", "desc");
//! let query = normalize(&raw, &schema);
//! let view = engine::view(&records, &query);
//!
//! assert_eq!(view.total_matched, 1);
//! assert_eq!(view.items[0].text("name").as_deref(), Some("Leather Phone Case"));
//! ```
//!
//! Serving the built-in collections over HTTP:
//!
//! ```rust,ignore
//! ServerBuilder::new()
//!     .with_config(DashboardConfig::default_config())
//!     .with_seed(products::NAME, products::seed())
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        CollectionSchema, DeskError, FieldDescriptor, FieldFormat, FieldKind, FieldValue,
        Mutation, MutationOutcome, PaginatedResponse, PaginationMeta, QueryDescriptor,
        RangeFilter, RawQuery, Record, RecordService, RecordSource, SortDirection, SortKey,
        normalize,
    };

    // === Engine ===
    pub use crate::engine::{self, Facet, ResultView};

    // === Built-in Collections ===
    pub use crate::entities::{contacts, groups, products};

    // === Configuration ===
    pub use crate::config::{DashboardConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRecordService;

    // === Re-exports from dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
