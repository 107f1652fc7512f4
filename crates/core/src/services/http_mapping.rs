//! Pure functions for mapping service errors to HTTP status codes.

use crate::cache::CacheError;

use super::ServiceError;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `InvalidData` -> 400 (Bad Request)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Cache(ConnectionFailed)` -> 503, any other cache error -> 500
///
/// # Examples
///
/// ```
/// use catalog_cache_core::services::{service_error_to_status_code, ServiceError};
///
/// let error = ServiceError::NotFound {
///     entity_type: "Catalog",
///     id: "main".to_string(),
/// };
/// assert_eq!(service_error_to_status_code(&error), 404);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::NotFound { .. } => 404,
        ServiceError::AlreadyExists { .. } => 409,
        ServiceError::InvalidData(_) => 400,
        ServiceError::ConnectionFailed(_) => 503,
        ServiceError::QueryFailed(_) => 500,
        ServiceError::Cache(CacheError::ConnectionFailed(_)) => 503,
        ServiceError::Cache(_) => 500,
    }
}
