//! Application state shared by the request handlers.
//!
//! Every service handle points at the same [`CatalogServicesDecorator`], so
//! all handlers read through and invalidate one cache region.

use std::sync::Arc;

use catalog_cache_core::cache::CacheManager;
use catalog_cache_core::services::{
    CachedServiceDecorator, CatalogSearchService, CatalogService, CategoryService, ItemService,
    PropertyService,
};

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::mock_data::seed_demo_data;
use crate::storage::{CatalogServicesDecorator, InMemoryCatalogStore};

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemService>,
    pub search: Arc<dyn CatalogSearchService>,
    pub properties: Arc<dyn PropertyService>,
    pub categories: Arc<dyn CategoryService>,
    pub catalogs: Arc<dyn CatalogService>,
    /// Cache controls of the decorator.
    pub cache: Arc<dyn CachedServiceDecorator>,
    /// The store behind the cache, kept for entry counts.
    pub memory_cache: Arc<MemoryCache>,
}

impl AppState {
    /// Wires the in-memory store behind the caching decorator.
    fn build(store: InMemoryCatalogStore, config: &Config) -> Self {
        let store = Arc::new(store);
        let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));
        let manager = Arc::new(CacheManager::new(memory_cache.clone(), config.cache_ttl()));

        let decorator = Arc::new(CatalogServicesDecorator::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            manager,
        ));

        Self {
            items: decorator.clone(),
            search: decorator.clone(),
            properties: decorator.clone(),
            categories: decorator.clone(),
            catalogs: decorator.clone(),
            cache: decorator,
            memory_cache,
        }
    }

    /// Creates the state from configuration, seeding demo data when enabled.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let store = InMemoryCatalogStore::new();
        if config.seed_demo_data {
            seed_demo_data(&store).await?;
        }

        tracing::info!(
            max_entries = config.cache_max_entries,
            ttl_seconds = config.cache_ttl_seconds,
            seeded = config.seed_demo_data,
            "Catalog cache ready"
        );

        Ok(Self::build(store, config))
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Creates an AppState over an empty store with default configuration.
    fn default() -> Self {
        Self::build(InMemoryCatalogStore::new(), &Config::default())
    }
}
