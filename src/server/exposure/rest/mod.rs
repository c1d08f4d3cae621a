//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.
//! Routes are generic over the collection name:
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/{collection}` | filtered, sorted page |
//! | POST | `/{collection}` | create |
//! | GET | `/{collection}/{id}` | read |
//! | PUT | `/{collection}/{id}` | merge update |
//! | DELETE | `/{collection}/{id}` | delete |
//! | PUT | `/{collection}/{id}/toggle/{field}` | flip a boolean |
//! | GET | `/{collection}/facets/{field}` | value counts |

pub mod handlers;

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{
    Json, Router,
    routing::{get, put},
};
use handlers::{
    create_record, delete_record, get_record, list_collections, list_facets, list_records,
    toggle_field, update_record,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing all collections
    /// * `custom_routes` - Additional custom routes to merge
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - Collection introspection
    /// - Collection routes
    /// - Custom routes
    /// - HTTP tracing, plus permissive CORS when enabled
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        if !host.is_ready() {
            anyhow::bail!("Host has no collections to expose");
        }
        let cors = host.server.cors;

        let mut app = Self::health_routes().merge(Self::collection_routes(host));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let app = app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
        Ok(if cors {
            app.layer(CorsLayer::permissive())
        } else {
            app
        })
    }

    /// Build the per-collection routes
    fn collection_routes(host: Arc<ServerHost>) -> Router {
        Router::new()
            .route("/collections", get(list_collections))
            .route("/{collection}", get(list_records).post(create_record))
            .route(
                "/{collection}/{id}",
                get(get_record).put(update_record).delete(delete_record),
            )
            .route("/{collection}/{id}/toggle/{field}", put(toggle_field))
            .route("/{collection}/facets/{field}", get(list_facets))
            .with_state(host)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "deskview"
        }))
    }
}
