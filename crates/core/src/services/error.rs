use thiserror::Error;

use crate::cache::CacheError;
use crate::catalog::ValidationError;

/// Errors returned by the catalog services and by the caching decorator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidData(err.to_string())
    }
}

/// Result type for catalog service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
