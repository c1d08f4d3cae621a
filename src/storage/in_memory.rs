//! In-memory implementation of RecordService for testing and development

use crate::core::error::{
    CollectionError, DeskError, RecordError, Result, StorageError, ValidationError,
};
use crate::core::field::FieldValue;
use crate::core::record::{CREATED_AT_FIELD, ID_FIELD, Record};
use crate::core::schema::CollectionSchema;
use crate::core::service::{Mutation, MutationOutcome, RecordService, RecordSource};
use crate::core::validation::{self, WriteKind};
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory record service for one collection
///
/// Records are kept in insertion order, so [`RecordSource::load`] returns a
/// stable sequence. Uses RwLock for thread-safe access; clones share state.
#[derive(Clone)]
pub struct InMemoryRecordService {
    schema: Arc<CollectionSchema>,
    records: Arc<RwLock<IndexMap<String, Record>>>,
}

impl InMemoryRecordService {
    /// Create an empty service for a collection
    pub fn new(schema: CollectionSchema) -> Self {
        Self {
            schema: Arc::new(schema),
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a service pre-filled with records
    ///
    /// Seed records bypass validation; records without an id get one. A seed
    /// record reusing an earlier id is skipped with a warning.
    pub fn with_records(schema: CollectionSchema, records: Vec<Record>) -> Self {
        let mut map = IndexMap::with_capacity(records.len());
        for mut record in records {
            let id = record_id(&record).unwrap_or_else(|| Uuid::new_v4().to_string());
            if map.contains_key(&id) {
                tracing::warn!(
                    collection = %schema.name,
                    id = %id,
                    "duplicate seed record skipped"
                );
                continue;
            }
            record.set(ID_FIELD, id.clone());
            map.insert(id, record);
        }

        Self {
            schema: Arc::new(schema),
            records: Arc::new(RwLock::new(map)),
        }
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<String, Record>>> {
        self.records.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<String, Record>>> {
        self.records.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }

    fn not_found(&self, id: &str) -> DeskError {
        RecordError::NotFound {
            collection: self.schema.name.clone(),
            id: id.to_string(),
        }
        .into()
    }

    fn create(&self, record: Record) -> Result<MutationOutcome> {
        let mut record = validation::clean(record);
        validation::validate(&self.schema, &record, WriteKind::Create)?;

        let id = record_id(&record).unwrap_or_else(|| Uuid::new_v4().to_string());
        record.set(ID_FIELD, id.clone());
        if !record.contains(CREATED_AT_FIELD) {
            record.set(CREATED_AT_FIELD, Utc::now().to_rfc3339());
        }

        let mut records = self.write()?;
        if records.contains_key(&id) {
            return Err(RecordError::AlreadyExists {
                collection: self.schema.name.clone(),
                id,
            }
            .into());
        }
        records.insert(id, record.clone());

        Ok(MutationOutcome::Created { record })
    }

    fn update(&self, id: &str, changes: Record) -> Result<MutationOutcome> {
        let changes = validation::clean(changes);
        if record_id(&changes).is_some_and(|new_id| new_id != id) {
            return Err(RecordError::IdChanged {
                collection: self.schema.name.clone(),
                id: id.to_string(),
            }
            .into());
        }
        validation::validate(&self.schema, &changes, WriteKind::Update)?;

        let mut records = self.write()?;
        let record = records.get_mut(id).ok_or_else(|| self.not_found(id))?;
        record.merge(changes);
        record.set(ID_FIELD, id.to_string());

        Ok(MutationOutcome::Updated {
            record: record.clone(),
        })
    }

    fn delete(&self, id: &str) -> Result<MutationOutcome> {
        let mut records = self.write()?;
        records
            .shift_remove(id)
            .ok_or_else(|| self.not_found(id))?;

        Ok(MutationOutcome::Deleted { id: id.to_string() })
    }

    fn toggle(&self, id: &str, field: &str) -> Result<MutationOutcome> {
        if self.schema.descriptor(field).is_none() {
            return Err(CollectionError::UnknownField {
                collection: self.schema.name.clone(),
                field: field.to_string(),
            }
            .into());
        }

        let mut records = self.write()?;
        let record = records.get_mut(id).ok_or_else(|| self.not_found(id))?;

        let current = match record.get(field) {
            None | Some(FieldValue::Null) => false,
            Some(FieldValue::Boolean(b)) => *b,
            Some(other) => {
                return Err(ValidationError::FieldError {
                    field: field.to_string(),
                    message: format!("cannot toggle a {} value", other.type_name()),
                }
                .into());
            }
        };
        record.set(field, !current);

        Ok(MutationOutcome::Updated {
            record: record.clone(),
        })
    }
}

/// Identifier carried by a record, as text
fn record_id(record: &Record) -> Option<String> {
    record
        .text(ID_FIELD)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

#[async_trait]
impl RecordSource for InMemoryRecordService {
    async fn load(&self) -> Result<Vec<Record>> {
        let records = self.read()?;
        Ok(records.values().cloned().collect())
    }
}

#[async_trait]
impl RecordService for InMemoryRecordService {
    async fn get(&self, id: &str) -> Result<Option<Record>> {
        let records = self.read()?;
        Ok(records.get(id).cloned())
    }

    async fn mutate(&self, mutation: Mutation) -> Result<MutationOutcome> {
        let operation = mutation.name();
        let result = match mutation {
            Mutation::Create(record) => self.create(record),
            Mutation::Update { id, changes } => self.update(&id, changes),
            Mutation::Delete { id } => self.delete(&id),
            Mutation::Toggle { id, field } => self.toggle(&id, &field),
        };

        match &result {
            Ok(outcome) => tracing::debug!(
                collection = %self.schema.name,
                operation,
                id = outcome.record().and_then(Record::id).unwrap_or_default(),
                "mutation applied"
            ),
            Err(error) => tracing::warn!(
                collection = %self.schema.name,
                operation,
                error = %error,
                "mutation rejected"
            ),
        }

        result
    }

    fn collection_schema(&self) -> Option<&CollectionSchema> {
        Some(&self.schema)
    }
}
