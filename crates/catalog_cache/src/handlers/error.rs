use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_cache_core::cache::CacheError;
use catalog_cache_core::services::{service_error_to_status_code, ServiceError};

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(service_error) = self.0.downcast_ref::<ServiceError>() {
            service_error_to_status_code(service_error)
        } else if let Some(cache_error) = self.0.downcast_ref::<CacheError>() {
            service_error_to_status_code(&ServiceError::Cache(cache_error.clone()))
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::warn!(status = %status_code, error = %self.0, "API error");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Error for a single-entity lookup that found nothing.
pub fn not_found(entity_type: &'static str, id: &str) -> AppError {
    AppError::from(ServiceError::NotFound {
        entity_type,
        id: id.to_string(),
    })
}
