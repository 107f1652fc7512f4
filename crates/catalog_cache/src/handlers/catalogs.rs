//! Catalog handlers (`/api/catalogs`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use catalog_cache_core::catalog::{Catalog, Property};

use super::{
    error::not_found,
    params::{required_list, IdsQuery},
};
use crate::{handlers::AppError, state::AppState};

/// List all catalogs (GET /api/catalogs).
pub async fn list_catalogs(State(state): State<AppState>) -> Result<Json<Vec<Catalog>>, AppError> {
    Ok(Json(state.catalogs.list_catalogs().await?))
}

/// Get a catalog by ID (GET /api/catalogs/{id}).
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Catalog>, AppError> {
    state
        .catalogs
        .get_catalog(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found("Catalog", &id))
}

/// List the properties owned by a catalog (GET /api/catalogs/{id}/properties).
pub async fn get_catalog_properties(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Property>>, AppError> {
    Ok(Json(state.properties.get_catalog_properties(&id).await?))
}

/// Create a catalog (POST /api/catalogs).
pub async fn create_catalog(
    State(state): State<AppState>,
    Json(catalog): Json<Catalog>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.catalogs.create_catalog(&catalog).await?;

    tracing::info!(catalog_id = %created.id, name = %created.name, "Created catalog");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update catalogs (PUT /api/catalogs).
pub async fn update_catalogs(
    State(state): State<AppState>,
    Json(catalogs): Json<Vec<Catalog>>,
) -> Result<StatusCode, AppError> {
    state.catalogs.update_catalogs(&catalogs).await?;

    tracing::info!(count = catalogs.len(), "Updated catalogs");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete catalogs with everything they own (DELETE /api/catalogs?ids=a,b).
pub async fn delete_catalogs(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<StatusCode, AppError> {
    let ids = required_list("ids", query.ids.as_deref())?;
    state.catalogs.delete_catalogs(&ids).await?;

    tracing::info!(count = ids.len(), "Deleted catalogs and their contents");

    Ok(StatusCode::NO_CONTENT)
}
