//! Cache key construction for the catalog services.
//!
//! Every key is `"Catalog-"` followed by the operation namespace and its
//! arguments, all joined with `", "`. Separators inside argument values are
//! not escaped, so `["a, b"]` and `["a", "b"]` render the same key.

use crate::catalog::{CategoryResponseGroup, ItemResponseGroup, SearchCriteria};

/// The single region holding every catalog cache entry.
pub const REGION_NAME: &str = "Catalog-Cache-Region";

/// Prefix shared by all catalog cache keys.
pub const KEY_PREFIX: &str = "Catalog-";

/// Separator between the namespace, the arguments and collection elements.
pub const KEY_SEPARATOR: &str = ", ";

pub mod namespaces {
    pub const ITEM_GET_BY_ID: &str = "ItemService.GetById";
    pub const ITEM_GET_BY_IDS: &str = "ItemService.GetByIds";
    pub const ITEM_GET_BY_CODE: &str = "ItemService.GetByCode";
    pub const ITEM_GET_BY_CODES: &str = "ItemService.GetByCodes";
    pub const SEARCH: &str = "CatalogSearchService.Search";
    pub const PROPERTY_GET_BY_ID: &str = "PropertyService.GetById";
    pub const PROPERTY_GET_BY_IDS: &str = "PropertyService.GetByIds";
    pub const PROPERTY_GET_ALL_CATALOG: &str = "PropertyService.GetAllCatalogProperties";
    pub const PROPERTY_GET_ALL: &str = "PropertyService.GetAllProperties";
    pub const PROPERTY_DICTIONARY_VALUES: &str = "PropertyService.SearchDictionaryValues";
    pub const CATEGORY_GET_BY_IDS: &str = "CategoryService.GetByIds";
    pub const CATEGORY_GET_BY_ID: &str = "CategoryService.GetById";
    pub const CATALOG_LIST: &str = "CatalogService.GetCatalogsList";
    pub const CATALOG_GET_BY_ID: &str = "CatalogService.GetById";
}

/// Builds a cache key from a namespace and its ordered arguments.
///
/// A `None` argument renders as the empty string and keeps its position.
///
/// # Examples
///
/// ```
/// use catalog_cache_core::cache::build_key;
///
/// assert_eq!(
///     build_key("ItemService.GetById", &[Some("P1"), Some("Full"), None]),
///     "Catalog-ItemService.GetById, P1, Full, "
/// );
/// assert_eq!(
///     build_key("CatalogService.GetCatalogsList", &[]),
///     "Catalog-CatalogService.GetCatalogsList"
/// );
/// ```
pub fn build_key(namespace: &str, parts: &[Option<&str>]) -> String {
    let mut key = String::from(KEY_PREFIX);
    key.push_str(namespace);
    for part in parts {
        key.push_str(KEY_SEPARATOR);
        key.push_str(part.unwrap_or_default());
    }
    key
}

/// Joins a collection argument, preserving order.
pub fn join_parts<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

pub fn item_key(id: &str, group: ItemResponseGroup, catalog_id: Option<&str>) -> String {
    build_key(
        namespaces::ITEM_GET_BY_ID,
        &[Some(id), Some(group.as_str()), catalog_id],
    )
}

pub fn items_key<S: AsRef<str>>(
    ids: &[S],
    group: ItemResponseGroup,
    catalog_id: Option<&str>,
) -> String {
    let ids = join_parts(ids);
    build_key(
        namespaces::ITEM_GET_BY_IDS,
        &[Some(&ids), Some(group.as_str()), catalog_id],
    )
}

pub fn item_by_code_key(code: &str, group: ItemResponseGroup, catalog_id: Option<&str>) -> String {
    build_key(
        namespaces::ITEM_GET_BY_CODE,
        &[Some(code), Some(group.as_str()), catalog_id],
    )
}

pub fn items_by_codes_key<S: AsRef<str>>(
    codes: &[S],
    group: ItemResponseGroup,
    catalog_id: Option<&str>,
) -> String {
    let codes = join_parts(codes);
    build_key(
        namespaces::ITEM_GET_BY_CODES,
        &[Some(&codes), Some(group.as_str()), catalog_id],
    )
}

pub fn search_key(criteria: &SearchCriteria) -> String {
    build_key(namespaces::SEARCH, &[Some(&criteria.cache_key())])
}

pub fn property_key(id: &str) -> String {
    build_key(namespaces::PROPERTY_GET_BY_ID, &[Some(id)])
}

pub fn properties_key<S: AsRef<str>>(ids: &[S]) -> String {
    build_key(namespaces::PROPERTY_GET_BY_IDS, &[Some(&join_parts(ids))])
}

pub fn catalog_properties_key(catalog_id: &str) -> String {
    build_key(namespaces::PROPERTY_GET_ALL_CATALOG, &[Some(catalog_id)])
}

pub fn all_properties_key() -> String {
    build_key(namespaces::PROPERTY_GET_ALL, &[])
}

pub fn dictionary_values_key(property_id: &str, keyword: Option<&str>) -> String {
    build_key(
        namespaces::PROPERTY_DICTIONARY_VALUES,
        &[Some(property_id), keyword],
    )
}

pub fn categories_key<S: AsRef<str>>(
    ids: &[S],
    group: CategoryResponseGroup,
    catalog_id: Option<&str>,
) -> String {
    let ids = join_parts(ids);
    build_key(
        namespaces::CATEGORY_GET_BY_IDS,
        &[Some(&ids), Some(group.as_str()), catalog_id],
    )
}

pub fn category_key(id: &str, group: CategoryResponseGroup, catalog_id: Option<&str>) -> String {
    build_key(
        namespaces::CATEGORY_GET_BY_ID,
        &[Some(id), Some(group.as_str()), catalog_id],
    )
}

pub fn catalogs_list_key() -> String {
    build_key(namespaces::CATALOG_LIST, &[])
}

pub fn catalog_key(id: &str) -> String {
    build_key(namespaces::CATALOG_GET_BY_ID, &[Some(id)])
}
