//! Property handlers (`/api/properties`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use catalog_cache_core::catalog::{Property, PropertyDictionaryValue};

use super::{
    error::not_found,
    params::{required_list, split_list, IdsQuery, KeywordQuery},
};
use crate::{handlers::AppError, state::AppState};

/// List properties (GET /api/properties).
///
/// With `?ids=a,b` only those properties are returned, in request order.
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<Json<Vec<Property>>, AppError> {
    let ids = split_list(query.ids.as_deref());
    let properties = if ids.is_empty() {
        state.properties.get_all_properties().await?
    } else {
        state.properties.get_properties(&ids).await?
    };

    Ok(Json(properties))
}

/// Get a property by ID (GET /api/properties/{id}).
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, AppError> {
    state
        .properties
        .get_property(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found("Property", &id))
}

/// Search a dictionary property's values (GET /api/properties/{id}/values).
pub async fn search_dictionary_values(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<Vec<PropertyDictionaryValue>>, AppError> {
    let keyword = query.keyword.as_deref().filter(|k| !k.trim().is_empty());
    let values = state
        .properties
        .search_dictionary_values(&id, keyword)
        .await?;

    Ok(Json(values))
}

/// Create a property (POST /api/properties).
pub async fn create_property(
    State(state): State<AppState>,
    Json(property): Json<Property>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.properties.create_property(&property).await?;

    tracing::info!(property_id = %created.id, name = %created.name, "Created property");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update properties (PUT /api/properties).
pub async fn update_properties(
    State(state): State<AppState>,
    Json(properties): Json<Vec<Property>>,
) -> Result<StatusCode, AppError> {
    state.properties.update_properties(&properties).await?;

    tracing::info!(count = properties.len(), "Updated properties");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete properties (DELETE /api/properties?ids=a,b).
pub async fn delete_properties(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<StatusCode, AppError> {
    let ids = required_list("ids", query.ids.as_deref())?;
    state.properties.delete_properties(&ids).await?;

    tracing::info!(count = ids.len(), "Deleted properties");

    Ok(StatusCode::NO_CONTENT)
}
