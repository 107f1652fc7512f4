//! Category handlers (`/api/categories`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use catalog_cache_core::catalog::Category;

use super::{
    error::not_found,
    params::{required_list, CategoryQuery, IdsQuery},
};
use crate::{handlers::AppError, state::AppState};

/// Get categories by IDs (GET /api/categories?ids=a,b).
pub async fn get_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<Category>>, AppError> {
    let ids = required_list("ids", query.ids.as_deref())?;
    let categories = state
        .categories
        .get_categories(&ids, query.resp_group, query.catalog_id.as_deref())
        .await?;

    Ok(Json(categories))
}

/// Get a category by ID (GET /api/categories/{id}).
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Category>, AppError> {
    state
        .categories
        .get_category(&id, query.resp_group, query.catalog_id.as_deref())
        .await?
        .map(Json)
        .ok_or_else(|| not_found("Category", &id))
}

/// Create a category (POST /api/categories).
pub async fn create_category(
    State(state): State<AppState>,
    Json(category): Json<Category>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.categories.create_category(&category).await?;

    tracing::info!(category_id = %created.id, name = %created.name, "Created category");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Create several categories at once (POST /api/categories/batch).
pub async fn create_categories(
    State(state): State<AppState>,
    Json(categories): Json<Vec<Category>>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.categories.create_categories(&categories).await?;

    tracing::info!(count = created.len(), "Created categories");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update categories (PUT /api/categories).
pub async fn update_categories(
    State(state): State<AppState>,
    Json(categories): Json<Vec<Category>>,
) -> Result<StatusCode, AppError> {
    state.categories.update_categories(&categories).await?;

    tracing::info!(count = categories.len(), "Updated categories");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete categories and their subtrees (DELETE /api/categories?ids=a,b).
pub async fn delete_categories(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<StatusCode, AppError> {
    let ids = required_list("ids", query.ids.as_deref())?;
    state.categories.delete_categories(&ids).await?;

    tracing::info!(count = ids.len(), "Deleted categories");

    Ok(StatusCode::NO_CONTENT)
}
