//! Product handlers (`/api/items`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use catalog_cache_core::catalog::CatalogProduct;

use super::{
    error::not_found,
    params::{required_list, IdsQuery, ItemQuery},
};
use crate::{handlers::AppError, state::AppState};

/// Get a product by ID (GET /api/items/{id}).
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<CatalogProduct>, AppError> {
    state
        .items
        .get_item(&id, query.resp_group, query.catalog_id.as_deref())
        .await?
        .map(Json)
        .ok_or_else(|| not_found("CatalogProduct", &id))
}

/// Get products by IDs (GET /api/items?ids=a,b).
pub async fn get_items(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<CatalogProduct>>, AppError> {
    let ids = required_list("ids", query.ids.as_deref())?;
    let items = state
        .items
        .get_items(&ids, query.resp_group, query.catalog_id.as_deref())
        .await?;

    Ok(Json(items))
}

/// Get a product by code (GET /api/items/by-code/{code}).
pub async fn get_item_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<CatalogProduct>, AppError> {
    state
        .items
        .get_item_by_code(&code, query.resp_group, query.catalog_id.as_deref())
        .await?
        .map(Json)
        .ok_or_else(|| not_found("CatalogProduct", &code))
}

/// Get products by codes (GET /api/items/by-codes?codes=a,b).
pub async fn get_items_by_codes(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<CatalogProduct>>, AppError> {
    let codes = required_list("codes", query.codes.as_deref())?;
    let items = state
        .items
        .get_items_by_codes(&codes, query.resp_group, query.catalog_id.as_deref())
        .await?;

    Ok(Json(items))
}

/// Create a product (POST /api/items).
pub async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<CatalogProduct>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.items.create_item(&item).await?;

    tracing::info!(item_id = %created.id, code = %created.code, "Created product");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Create several products at once (POST /api/items/batch).
pub async fn create_items(
    State(state): State<AppState>,
    Json(items): Json<Vec<CatalogProduct>>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.items.create_items(&items).await?;

    tracing::info!(count = created.len(), "Created products");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update products (PUT /api/items).
pub async fn update_items(
    State(state): State<AppState>,
    Json(items): Json<Vec<CatalogProduct>>,
) -> Result<StatusCode, AppError> {
    state.items.update_items(&items).await?;

    tracing::info!(count = items.len(), "Updated products");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete products (DELETE /api/items?ids=a,b).
pub async fn delete_items(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<StatusCode, AppError> {
    let ids = required_list("ids", query.ids.as_deref())?;
    state.items.delete_items(&ids).await?;

    tracing::info!(count = ids.len(), "Deleted products");

    Ok(StatusCode::NO_CONTENT)
}
