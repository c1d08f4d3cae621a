//! Configuration loading and management

use crate::core::error::{ConfigError, DeskError, Result};
use crate::core::schema::CollectionSchema;
use crate::entities;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_cors() -> bool {
    true
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Whether to allow cross-origin requests from any origin
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors: default_cors(),
        }
    }
}

/// Complete configuration of a dashboard server
///
/// # YAML
///
/// ```yaml
/// server:
///   bind: 0.0.0.0:8080
/// collections:
///   - name: products
///     default_sort: name
///     fields:
///       - { name: name, kind: text, searchable: true }
///       - { name: price, kind: numeric }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Collections exposed by the server
    pub collections: Vec<CollectionSchema>,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: format!("{}: {}", path.display(), e),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Configuration with the built-in collections
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            collections: entities::builtin_schemas(),
        }
    }

    /// Find a collection schema by name
    pub fn schema(&self, name: &str) -> Option<&CollectionSchema> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Check the collections for consistency
    ///
    /// Stops at the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for schema in &self.collections {
            if !names.insert(schema.name.as_str()) {
                return Err(duplicate("collection", &schema.name));
            }
            validate_schema(schema)?;
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn duplicate(kind: &'static str, name: &str) -> DeskError {
    ConfigError::Duplicate {
        kind,
        name: name.to_string(),
    }
    .into()
}

fn invalid(schema: &CollectionSchema, key: &str, message: impl Into<String>) -> DeskError {
    ConfigError::InvalidValue {
        field: format!("{}.{}", schema.name, key),
        message: message.into(),
    }
    .into()
}

/// Check one collection schema: name, unique fields, defaults and page sizes
pub fn validate_schema(schema: &CollectionSchema) -> Result<()> {
    if schema.name.trim().is_empty() {
        return Err(invalid(schema, "name", "collection name must not be empty"));
    }
    if schema.fields.is_empty() {
        return Err(invalid(schema, "fields", "at least one field is required"));
    }

    let mut fields = HashSet::new();
    for field in &schema.fields {
        if !fields.insert(field.name.as_str()) {
            return Err(duplicate("field", &format!("{}.{}", schema.name, field.name)));
        }
    }

    if schema.descriptor(&schema.default_sort).is_none() {
        return Err(invalid(
            schema,
            "default_sort",
            format!("unknown field '{}'", schema.default_sort),
        ));
    }
    if let Some(category) = &schema.category_field
        && schema.descriptor(category).is_none()
    {
        return Err(invalid(
            schema,
            "category_field",
            format!("unknown field '{}'", category),
        ));
    }

    if schema.default_page_size == 0 || schema.max_page_size == 0 {
        return Err(invalid(schema, "page_size", "page sizes must be at least 1"));
    }
    if schema.default_page_size > schema.max_page_size {
        return Err(invalid(
            schema,
            "default_page_size",
            format!(
                "{} exceeds max_page_size {}",
                schema.default_page_size, schema.max_page_size
            ),
        ));
    }

    Ok(())
}
