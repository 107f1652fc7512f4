mod error;
mod operations;
mod search;
mod types;

pub use error::ValidationError;
pub use operations::{
    category_matches, descendant_category_ids, paginate, product_matches, validate_catalog,
    validate_category, validate_product, validate_property,
};
pub use search::{SearchCriteria, SearchResponseGroup, SearchResult, DEFAULT_TAKE};
pub use types::{
    Catalog, CatalogProduct, Category, CategoryResponseGroup, ItemResponseGroup, Property,
    PropertyDictionaryValue, PropertyValue, PropertyValueType,
};
