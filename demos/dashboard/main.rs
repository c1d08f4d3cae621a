//! Dashboard Example
//!
//! Serves the built-in contacts and products collections from memory:
//! - filtered, sorted and paginated list routes
//! - create, update, delete and toggle routes
//! - facet counts for categorical fields
//!
//! Pass a YAML config path as the first argument to serve other collections.

use anyhow::Result;
use deskview::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deskview=debug,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(&path)?,
        None => DashboardConfig::default_config(),
    };

    let mut builder = ServerBuilder::new().with_config(config.clone());
    if config.schema(contacts::NAME).is_some() {
        builder = builder.with_seed(contacts::NAME, contacts::seed());
    }
    if config.schema(products::NAME).is_some() {
        builder = builder.with_seed(products::NAME, products::seed());
    }
    if config.schema(groups::NAME).is_some() {
        builder = builder.with_seed(groups::NAME, groups::seed());
    }

    println!("🌐 Server running on http://{}", config.server.bind);
    println!("\n📚 Routes:");
    for schema in &config.collections {
        let c = &schema.name;
        println!("\n  🔷 {}:", c);
        println!("    GET    /{c}?search=&sort=field:desc&min_<field>=&max_<field>=&category=&page=&limit=");
        println!("    POST   /{c}");
        println!("    GET    /{c}/{{id}}");
        println!("    PUT    /{c}/{{id}}");
        println!("    DELETE /{c}/{{id}}");
        println!("    PUT    /{c}/{{id}}/toggle/{{field}}");
        println!("    GET    /{c}/facets/{{field}}");
    }
    println!("\n  ⚙️  GET /collections, GET /health");
    println!();

    builder.serve_configured().await
}
