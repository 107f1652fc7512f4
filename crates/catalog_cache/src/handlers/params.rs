//! Query string shapes shared by the catalog handlers.

use serde::Deserialize;

use catalog_cache_core::catalog::{CategoryResponseGroup, ItemResponseGroup};
use catalog_cache_core::services::ServiceError;

/// Query parameters for product reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    /// Comma-separated product ids
    pub ids: Option<String>,
    /// Comma-separated product codes
    pub codes: Option<String>,
    #[serde(default)]
    pub resp_group: ItemResponseGroup,
    pub catalog_id: Option<String>,
}

/// Query parameters for category reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    /// Comma-separated category ids
    pub ids: Option<String>,
    #[serde(default)]
    pub resp_group: CategoryResponseGroup,
    pub catalog_id: Option<String>,
}

/// Query parameters carrying only a list of ids.
#[derive(Debug, Default, Deserialize)]
pub struct IdsQuery {
    /// Comma-separated ids
    pub ids: Option<String>,
}

/// Query parameters for dictionary value lookups.
#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    pub keyword: Option<String>,
}

/// Splits a comma-separated list, dropping blanks. Order is preserved.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Like [`split_list`], but an empty result is a client error.
pub fn required_list(name: &str, raw: Option<&str>) -> Result<Vec<String>, ServiceError> {
    let values = split_list(raw);
    if values.is_empty() {
        return Err(ServiceError::InvalidData(format!(
            "Query parameter `{name}` must list at least one value"
        )));
    }
    Ok(values)
}
