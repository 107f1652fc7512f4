//! Cache control endpoints.

use axum::{extract::State, http::StatusCode, Json};

use catalog_cache_core::cache::CacheStats;

use crate::{handlers::AppError, state::AppState};

/// Drop every cached catalog read (POST /api/cache/clear).
pub async fn clear_cache(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.cache.clear_cache().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Hit, miss and invalidation counters (GET /api/cache/stats).
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.cache_stats())
}
