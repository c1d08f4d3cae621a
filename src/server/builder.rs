//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::{CollectionHandle, ServerHost};
use crate::config::{self, DashboardConfig, ServerConfig};
use crate::core::record::Record;
use crate::core::schema::CollectionSchema;
use crate::core::service::RecordService;
use anyhow::Result;
use axum::Router;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Paths owned by the server itself; no collection may use them
const RESERVED_NAMES: &[&str] = &["health", "healthz", "collections"];

/// Builder for creating HTTP servers with one route set per collection
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_collection(products::schema(), InMemoryRecordService::new(products::schema()))
///     .build()?;
/// ```
pub struct ServerBuilder {
    server: ServerConfig,
    config: Option<DashboardConfig>,
    collections: Vec<(CollectionSchema, Arc<dyn RecordService>)>,
    seeds: Vec<(String, Vec<Record>)>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            server: ServerConfig::default(),
            config: None,
            collections: Vec::new(),
            seeds: Vec::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Use a dashboard configuration
    ///
    /// Server settings are taken from it. Every configured collection without
    /// an explicitly registered service gets an in-memory one.
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.server = config.server.clone();
        self.config = Some(config);
        self
    }

    /// Set the HTTP settings
    pub fn with_server_config(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    /// Register a collection served by `service`
    pub fn with_collection(
        mut self,
        schema: CollectionSchema,
        service: impl RecordService + 'static,
    ) -> Self {
        self.collections.push((schema, Arc::new(service)));
        self
    }

    /// Initial records for a collection created from the configuration
    pub fn with_seed(mut self, collection: impl Into<String>, records: Vec<Record>) -> Self {
        self.seeds.push((collection.into(), records));
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the collection routes, such as exports
    /// or dashboard summaries.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let mut collections: IndexMap<String, CollectionHandle> = IndexMap::new();

        for (schema, service) in std::mem::take(&mut self.collections) {
            let name = schema.name.clone();
            if collections.contains_key(&name) {
                anyhow::bail!("Collection '{}' is registered twice", name);
            }
            config::validate_schema(&schema)?;
            if let Some(own) = service.collection_schema()
                && *own != schema
            {
                anyhow::bail!(
                    "Collection '{}' is registered with a service using a different schema ('{}')",
                    name,
                    own.name
                );
            }
            collections.insert(name, CollectionHandle::new(schema, service));
        }

        if let Some(config) = self.config.take() {
            config.validate()?;
            for schema in config.collections {
                if collections.contains_key(&schema.name) {
                    continue;
                }
                let service = self.configured_service(&schema)?;
                collections.insert(schema.name.clone(), CollectionHandle::new(schema, service));
            }
        }

        if collections.is_empty() {
            anyhow::bail!("At least one collection is required. Call .with_collection()");
        }
        if let Some(name) = collections
            .keys()
            .find(|name| RESERVED_NAMES.contains(&name.as_str()))
        {
            anyhow::bail!("Collection name '{}' is reserved", name);
        }
        // Seeds left over did not match a collection built from the configuration
        if let Some((name, _)) = self.seeds.first() {
            anyhow::bail!(
                "Seed records for '{}' were not used; seeds only apply to configured collections",
                name
            );
        }

        tracing::debug!(collections = ?collections.keys().collect::<Vec<_>>(), "host built");

        Ok(ServerHost::new(self.server, collections))
    }

    #[cfg(feature = "in-memory")]
    fn configured_service(&mut self, schema: &CollectionSchema) -> Result<Arc<dyn RecordService>> {
        use crate::storage::InMemoryRecordService;

        let records = self
            .seeds
            .iter()
            .position(|(name, _)| *name == schema.name)
            .map(|index| self.seeds.swap_remove(index).1)
            .unwrap_or_default();

        Ok(Arc::new(InMemoryRecordService::with_records(
            schema.clone(),
            records,
        )))
    }

    #[cfg(not(feature = "in-memory"))]
    fn configured_service(&mut self, schema: &CollectionSchema) -> Result<Arc<dyn RecordService>> {
        anyhow::bail!(
            "No record service registered for collection '{}'",
            schema.name
        )
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - list/create/read/update/delete/toggle routes for every collection
    /// - facet routes
    /// - health and introspection routes
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_config(DashboardConfig::default_config())
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on the address from the server settings
    pub async fn serve_configured(self) -> Result<()> {
        let addr = self.server.bind.clone();
        self.serve(&addr).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, starting graceful shutdown...");
        },
    }
}
