use axum::{extract::State, Json};

use catalog_cache_core::catalog::{SearchCriteria, SearchResult};

use crate::{handlers::AppError, state::AppState};

/// Search products and categories (POST /api/search).
pub async fn search(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<SearchResult>, AppError> {
    Ok(Json(state.search.search(&criteria).await?))
}
