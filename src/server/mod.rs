//! Server module for building HTTP servers over record collections
//!
//! `ServerBuilder` assembles a `ServerHost` from collections (schema plus
//! record service) and exposes it through REST:
//! - list, create, read, update, delete and toggle routes per collection
//! - facet counts for categorical fields
//! - health and introspection routes

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::{CollectionHandle, ServerHost};
