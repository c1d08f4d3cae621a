//! HTTP handlers for collection operations
//!
//! Every handler is collection-agnostic: the collection name comes from the
//! path and is resolved against the [`ServerHost`].

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{CollectionError, DeskError, RecordError, Result, ValidationError};
use crate::core::field::FieldKind;
use crate::core::query::{PaginatedResponse, RawQuery, normalize};
use crate::core::record::Record;
use crate::core::service::Mutation;
use crate::engine::{self, Facet};
use crate::server::host::{CollectionHandle, ServerHost};

/// Shared handler state
pub type AppState = Arc<ServerHost>;

/// Response for the facets endpoint
#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub field: String,
    pub facets: Vec<Facet>,
}

fn body(payload: std::result::Result<Json<Record>, JsonRejection>) -> Result<Record> {
    payload.map(|Json(record)| record).map_err(|rejection| {
        ValidationError::InvalidJson {
            message: rejection.body_text(),
        }
        .into()
    })
}

/// Resolve a field name that must exist in the collection schema
fn known_field(handle: &CollectionHandle, field: &str) -> Result<FieldKind> {
    handle.schema.kind_of(field).ok_or_else(|| {
        CollectionError::UnknownField {
            collection: handle.schema.name.clone(),
            field: field.to_string(),
        }
        .into()
    })
}

/// List one page of a collection
///
/// GET /{collection}?search=..&sort=price:desc&min_price=10&category=Home&page=2&limit=20
pub async fn list_records(
    State(host): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let handle = host.collection(&collection)?;
    let query = normalize(&RawQuery::from_params(&params), &handle.schema);
    let records = handle.service.load().await?;

    let view = engine::view(&records, &query);
    let response: PaginatedResponse<&Record> = view.into();

    Ok(Json(response).into_response())
}

/// Create a record
///
/// POST /{collection}
pub async fn create_record(
    State(host): State<AppState>,
    Path(collection): Path<String>,
    payload: std::result::Result<Json<Record>, JsonRejection>,
) -> Result<Response> {
    let handle = host.collection(&collection)?;
    let record = body(payload)?;

    let outcome = handle.service.mutate(Mutation::Create(record)).await?;
    Ok((StatusCode::CREATED, Json(outcome.record().cloned())).into_response())
}

/// Get a record by id
///
/// GET /{collection}/{id}
pub async fn get_record(
    State(host): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Record>> {
    let handle = host.collection(&collection)?;

    let record = handle.service.get(&id).await?.ok_or_else(|| {
        DeskError::from(RecordError::NotFound {
            collection: handle.schema.name.clone(),
            id: id.clone(),
        })
    })?;

    Ok(Json(record))
}

/// Merge changes into a record
///
/// PUT /{collection}/{id}
pub async fn update_record(
    State(host): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    payload: std::result::Result<Json<Record>, JsonRejection>,
) -> Result<Response> {
    let handle = host.collection(&collection)?;
    let changes = body(payload)?;

    let outcome = handle
        .service
        .mutate(Mutation::Update { id, changes })
        .await?;
    Ok(Json(outcome.record().cloned()).into_response())
}

/// Delete a record
///
/// DELETE /{collection}/{id}
pub async fn delete_record(
    State(host): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let handle = host.collection(&collection)?;
    handle.service.mutate(Mutation::Delete { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a boolean field
///
/// PUT /{collection}/{id}/toggle/{field}
pub async fn toggle_field(
    State(host): State<AppState>,
    Path((collection, id, field)): Path<(String, String, String)>,
) -> Result<Response> {
    let handle = host.collection(&collection)?;
    known_field(handle, &field)?;

    let outcome = handle
        .service
        .mutate(Mutation::Toggle { id, field })
        .await?;
    Ok(Json(outcome.record().cloned()).into_response())
}

/// Distinct values of a categorical field with their counts
///
/// GET /{collection}/facets/{field}
///
/// Search and range parameters narrow the counted records the same way they
/// narrow the list endpoint; sorting and paging parameters are ignored.
pub async fn list_facets(
    State(host): State<AppState>,
    Path((collection, field)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<FacetsResponse>> {
    let handle = host.collection(&collection)?;
    if known_field(handle, &field)? != FieldKind::Categorical {
        return Err(ValidationError::FieldError {
            field: field.clone(),
            message: "facets are only available for categorical fields".to_string(),
        }
        .into());
    }

    let mut query = normalize(&RawQuery::from_params(&params), &handle.schema);
    query.category_filter = None;

    let records = handle.service.load().await?;
    let matching = engine::filter(&records, &query);
    let facets = engine::facets(matching, &field);

    Ok(Json(FacetsResponse { field, facets }))
}

/// Schema introspection
///
/// GET /collections
pub async fn list_collections(State(host): State<AppState>) -> Json<Value> {
    Json(json!({ "collections": host.schemas() }))
}
