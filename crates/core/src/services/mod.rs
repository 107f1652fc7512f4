mod error;
mod http_mapping;
mod traits;

pub use error::{Result, ServiceError};
pub use http_mapping::service_error_to_status_code;
pub use traits::{
    CachedServiceDecorator, CatalogSearchService, CatalogService, CategoryService, ItemService,
    PropertyService,
};
