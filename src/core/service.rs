//! Service traits for loading and mutating record collections
//!
//! The engine only ever sees `Vec<Record>` snapshots returned by
//! [`RecordSource::load`]. Mutations go through [`RecordService::mutate`];
//! afterwards callers reload and re-run the view with the same query.

use crate::core::error::Result;
use crate::core::record::Record;
use crate::core::schema::CollectionSchema;
use async_trait::async_trait;
use serde::Serialize;

/// A change applied to one collection
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a new record; an `id` is generated when absent
    Create(Record),

    /// Merge `changes` into the record with this id
    Update { id: String, changes: Record },

    /// Remove the record with this id
    Delete { id: String },

    /// Flip a boolean field (a missing field counts as `false`)
    Toggle { id: String, field: String },
}

impl Mutation {
    /// Short operation name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
            Mutation::Toggle { .. } => "toggle",
        }
    }
}

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MutationOutcome {
    Created { record: Record },
    Updated { record: Record },
    Deleted { id: String },
}

impl MutationOutcome {
    /// The record after the mutation, if it still exists
    pub fn record(&self) -> Option<&Record> {
        match self {
            MutationOutcome::Created { record } | MutationOutcome::Updated { record } => {
                Some(record)
            }
            MutationOutcome::Deleted { .. } => None,
        }
    }
}

/// Read side of a collection: yields the full record set
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every record in stable order
    async fn load(&self) -> Result<Vec<Record>>;
}

/// Read and write access to one collection
///
/// Implementations validate mutations against the collection schema and are
/// free to use any storage mechanism.
#[async_trait]
pub trait RecordService: RecordSource {
    /// Get a record by id
    async fn get(&self, id: &str) -> Result<Option<Record>>;

    /// Apply a mutation
    async fn mutate(&self, mutation: Mutation) -> Result<MutationOutcome>;

    /// The schema this service validates against, when it keeps one
    fn collection_schema(&self) -> Option<&CollectionSchema> {
        None
    }
}
