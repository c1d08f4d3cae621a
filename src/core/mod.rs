//! Core module containing the record model, query types and service traits

pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod schema;
pub mod service;
pub mod validation;

pub use error::{DeskError, Result};
pub use field::{FieldDescriptor, FieldFormat, FieldKind, FieldValue};
pub use query::{
    CategoryFilter, PaginatedResponse, PaginationMeta, QueryDescriptor, RangeFilter, RawQuery,
    SortDirection, SortKey, normalize,
};
pub use record::Record;
pub use schema::CollectionSchema;
pub use service::{Mutation, MutationOutcome, RecordService, RecordSource};
