//! Typed error handling for deskview
//!
//! The collection view engine itself never fails: every engine function is
//! total over its input. Errors only arise around it, in record services,
//! configuration loading and the REST layer.
//!
//! # Error Categories
//!
//! - [`RecordError`]: record lookups and mutations (not found, conflicts)
//! - [`CollectionError`]: unknown collections or fields in a request
//! - [`ValidationError`]: mutation payloads that violate the collection schema
//! - [`ConfigError`]: configuration parsing and validation
//! - [`StorageError`]: record service backends
//!
//! # Example
//!
//! ```rust,ignore
//! match service.mutate(Mutation::Delete { id }).await {
//!     Ok(_) => {}
//!     Err(DeskError::Record(RecordError::NotFound { id, .. })) => {
//!         println!("record {} already gone", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for deskview
#[derive(Debug, Error)]
pub enum DeskError {
    /// Record-related errors (lookups, mutations)
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Unknown collections or fields
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// Payload validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DeskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeskError::Record(e) => e.status_code(),
            DeskError::Collection(_) => StatusCode::NOT_FOUND,
            DeskError::Validation(_) => StatusCode::BAD_REQUEST,
            DeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DeskError::Storage(e) => e.status_code(),
            DeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DeskError::Record(e) => e.error_code(),
            DeskError::Collection(e) => e.error_code(),
            DeskError::Validation(_) => "VALIDATION_ERROR",
            DeskError::Config(_) => "CONFIG_ERROR",
            DeskError::Storage(_) => "STORAGE_ERROR",
            DeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DeskError::Record(RecordError::NotFound { collection, id })
            | DeskError::Record(RecordError::AlreadyExists { collection, id }) => {
                Some(serde_json::json!({ "collection": collection, "id": id }))
            }
            DeskError::Collection(CollectionError::UnknownField { collection, field }) => {
                Some(serde_json::json!({ "collection": collection, "field": field }))
            }
            DeskError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors related to record lookups and mutations
#[derive(Debug, Error)]
pub enum RecordError {
    /// No record with this id in the collection
    #[error("{collection} record with id '{id}' not found")]
    NotFound { collection: String, id: String },

    /// A record with this id already exists
    #[error("{collection} record with id '{id}' already exists")]
    AlreadyExists { collection: String, id: String },

    /// An update tried to change the record id
    #[error("cannot change id of {collection} record '{id}'")]
    IdChanged { collection: String, id: String },
}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::AlreadyExists { .. } => StatusCode::CONFLICT,
            RecordError::IdChanged { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordError::AlreadyExists { .. } => "RECORD_ALREADY_EXISTS",
            RecordError::IdChanged { .. } => "RECORD_ID_CHANGED",
        }
    }
}

// =============================================================================
// Collection Errors
// =============================================================================

/// Errors for requests naming collections or fields that do not exist
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },

    #[error("Collection '{collection}' has no field '{field}'")]
    UnknownField { collection: String, field: String },
}

impl CollectionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CollectionError::UnknownCollection { .. } => "UNKNOWN_COLLECTION",
            CollectionError::UnknownField { .. } => "UNKNOWN_FIELD",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to mutation payload validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not a flat JSON object of scalar values
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A value is present but not acceptable
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// The same name is declared twice
    #[error("Duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    /// Config file does not exist
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    /// Other I/O failure while reading config
    #[error("I/O error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to record service backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lock guarding in-memory state was poisoned
    #[error("Storage lock poisoned: {message}")]
    LockPoisoned { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::LockPoisoned { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        DeskError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for DeskError {
    fn from(err: serde_yaml::Error) -> Self {
        DeskError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        DeskError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for deskview operations
pub type Result<T> = std::result::Result<T, DeskError>;
