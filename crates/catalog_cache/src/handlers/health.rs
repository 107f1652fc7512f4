//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Cache region stats (fast, passive)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use catalog_cache_core::cache::{CacheStats, REGION_NAME};

use crate::state::AppState;

/// Body of `/healthz`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub region: &'static str,
    pub entries: usize,
    pub stats: CacheStats,
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Cache stats without touching the catalog services.
pub async fn healthz(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        region: REGION_NAME,
        entries: state.memory_cache.len().await,
        stats: state.cache.cache_stats(),
    })
}
