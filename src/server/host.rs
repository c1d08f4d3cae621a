//! Server host for transport-agnostic API exposure
//!
//! The host holds the collections (schema plus record service) and the server
//! settings. Exposures consume it to build their routers.

use crate::config::ServerConfig;
use crate::core::error::{CollectionError, Result};
use crate::core::schema::CollectionSchema;
use crate::core::service::RecordService;
use indexmap::IndexMap;
use std::sync::Arc;

/// One collection as served: its schema and the service holding its records
#[derive(Clone)]
pub struct CollectionHandle {
    pub schema: Arc<CollectionSchema>,
    pub service: Arc<dyn RecordService>,
}

impl CollectionHandle {
    pub fn new(schema: CollectionSchema, service: Arc<dyn RecordService>) -> Self {
        Self {
            schema: Arc::new(schema),
            service,
        }
    }
}

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(ServerConfig::default(), collections));
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    /// HTTP settings (bind address, CORS)
    pub server: ServerConfig,

    /// Collections by name, in registration order
    collections: IndexMap<String, CollectionHandle>,
}

impl ServerHost {
    pub fn new(server: ServerConfig, collections: IndexMap<String, CollectionHandle>) -> Self {
        Self {
            server,
            collections,
        }
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Result<&CollectionHandle> {
        self.collections.get(name).ok_or_else(|| {
            CollectionError::UnknownCollection {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Schemas of every collection, in registration order
    pub fn schemas(&self) -> Vec<&CollectionSchema> {
        self.collections
            .values()
            .map(|handle| handle.schema.as_ref())
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        !self.collections.is_empty()
    }
}
