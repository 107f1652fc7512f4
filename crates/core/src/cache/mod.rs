mod error;
mod keys;
mod manager;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    all_properties_key, build_key, catalog_key, catalog_properties_key, catalogs_list_key,
    categories_key, category_key, dictionary_values_key, item_by_code_key, item_key,
    items_by_codes_key, items_key, join_parts, namespaces, properties_key, property_key,
    search_key, KEY_PREFIX, KEY_SEPARATOR, REGION_NAME,
};
pub use manager::{CacheManager, CacheStats};
pub use serialization::{deserialize_value, serialize_value};
pub use traits::Cache;
