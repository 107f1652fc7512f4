//! Caching decorator over the catalog services.
//!
//! [`CatalogServicesDecorator`] implements all five catalog service traits
//! by delegating to wrapped implementations:
//!
//! - **Reads**: build a key from the operation namespace and its arguments,
//!   then go through the cache; the wrapped service only runs on a miss
//! - **Writes**: run the wrapped service first; on success, clear the whole
//!   `Catalog-Cache-Region` so that no read is served stale
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryCatalogStore::new());
//! let cache = Arc::new(CacheManager::new(Arc::new(MemoryCache::new(10_000)), None));
//!
//! let catalog = CatalogServicesDecorator::new(
//!     store.clone(), store.clone(), store.clone(), store.clone(), store, cache,
//! );
//! ```

mod catalog;
mod category;
mod item;
mod property;
mod search;
#[cfg(test)]
mod test_support;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use catalog_cache_core::cache::{self, Cache, CacheManager, CacheStats, REGION_NAME};
use catalog_cache_core::services::{
    CachedServiceDecorator, CatalogSearchService, CatalogService, CategoryService, ItemService,
    PropertyService, Result,
};

/// Read-through cache in front of the five catalog services.
///
/// # Type Parameters
///
/// * `C` - The cache store behind the [`CacheManager`]
pub struct CatalogServicesDecorator<C>
where
    C: Cache,
{
    items: Arc<dyn ItemService>,
    search: Arc<dyn CatalogSearchService>,
    properties: Arc<dyn PropertyService>,
    categories: Arc<dyn CategoryService>,
    catalogs: Arc<dyn CatalogService>,
    cache: Arc<CacheManager<C>>,
}

impl<C> CatalogServicesDecorator<C>
where
    C: Cache,
{
    /// Creates a decorator over the given services, sharing one cache.
    pub fn new(
        items: Arc<dyn ItemService>,
        search: Arc<dyn CatalogSearchService>,
        properties: Arc<dyn PropertyService>,
        categories: Arc<dyn CategoryService>,
        catalogs: Arc<dyn CatalogService>,
        cache: Arc<CacheManager<C>>,
    ) -> Self {
        Self {
            items,
            search,
            properties,
            categories,
            catalogs,
            cache,
        }
    }

    async fn cached<V, F, Fut>(&self, key: String, compute: F) -> Result<V>
    where
        V: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send,
    {
        self.cache.get_or_compute(REGION_NAME, &key, compute).await
    }

    /// Clears the region after a successful write.
    async fn invalidate(&self, operation: &'static str) -> Result<()> {
        self.cache.clear_region(REGION_NAME).await?;
        tracing::debug!(operation, region = REGION_NAME, "Catalog cache invalidated");
        Ok(())
    }
}

#[async_trait]
impl<C> CachedServiceDecorator for CatalogServicesDecorator<C>
where
    C: Cache + 'static,
{
    async fn clear_cache(&self) -> cache::Result<()> {
        self.cache.clear_region(REGION_NAME).await?;
        tracing::info!(region = REGION_NAME, "Catalog cache cleared on request");
        Ok(())
    }

    fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use catalog_cache_core::catalog::{
        Catalog, CatalogProduct, Category, CategoryResponseGroup, ItemResponseGroup, Property,
        SearchCriteria,
    };
    use catalog_cache_core::services::ServiceError;

    use super::test_support::{decorator, product, MockCache};
    use super::*;

    #[tokio::test]
    async fn test_read_write_read_scenario() {
        let (services, _cache, catalog) = decorator().await;

        let first = catalog
            .get_item("P1", ItemResponseGroup::Full, None)
            .await
            .unwrap();
        let second = catalog
            .get_item("P1", ItemResponseGroup::Full, None)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(services.reads.load(Ordering::SeqCst), 1);

        let mut renamed = product("P1");
        renamed.name = "X".to_string();
        catalog.update_items(&[renamed]).await.unwrap();

        let third = catalog
            .get_item("P1", ItemResponseGroup::Full, None)
            .await
            .unwrap();

        assert_eq!(services.reads.load(Ordering::SeqCst), 2);
        assert_eq!(third.map(|p| p.name), Some("X".to_string()));
    }

    #[tokio::test]
    async fn test_write_in_one_facet_invalidates_every_facet() {
        let (services, _cache, catalog) = decorator().await;

        catalog
            .get_item("P1", ItemResponseGroup::ItemInfo, None)
            .await
            .unwrap();
        catalog.search(&SearchCriteria::default()).await.unwrap();
        catalog.get_all_properties().await.unwrap();
        catalog
            .get_category("phones", CategoryResponseGroup::Info, None)
            .await
            .unwrap();
        catalog.list_catalogs().await.unwrap();
        assert_eq!(services.reads.load(Ordering::SeqCst), 5);

        catalog
            .create_property(&Property::new("size", "Size", "main"))
            .await
            .unwrap();

        catalog
            .get_item("P1", ItemResponseGroup::ItemInfo, None)
            .await
            .unwrap();
        catalog.search(&SearchCriteria::default()).await.unwrap();
        catalog.get_all_properties().await.unwrap();
        catalog
            .get_category("phones", CategoryResponseGroup::Info, None)
            .await
            .unwrap();
        catalog.list_catalogs().await.unwrap();
        assert_eq!(services.reads.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_cache() {
        let (services, cache, catalog) = decorator().await;

        catalog.list_catalogs().await.unwrap();
        services.fail_writes.store(true, Ordering::SeqCst);

        let result = catalog.create_catalog(&Catalog::new("other", "Other")).await;

        assert!(matches!(result, Err(ServiceError::ConnectionFailed(_))));
        assert_eq!(cache.clear_calls.load(Ordering::SeqCst), 0);

        catalog.list_catalogs().await.unwrap();
        assert_eq!(services.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_every_failed_write_keeps_cache() {
        let (services, cache, catalog) = decorator().await;

        async fn read_all(catalog: &CatalogServicesDecorator<MockCache>) {
            catalog
                .get_item("P1", ItemResponseGroup::ItemInfo, None)
                .await
                .unwrap();
            catalog.search(&SearchCriteria::default()).await.unwrap();
            catalog.get_all_properties().await.unwrap();
            catalog
                .get_category("phones", CategoryResponseGroup::Info, None)
                .await
                .unwrap();
            catalog.list_catalogs().await.unwrap();
        }

        read_all(&catalog).await;
        assert_eq!(services.reads.load(Ordering::SeqCst), 5);

        services.fail_writes.store(true, Ordering::SeqCst);
        let ids = vec!["P1".to_string()];
        let writes: Vec<Result<()>> = vec![
            catalog.create_item(&product("P3")).await.map(|_| ()),
            catalog.create_items(&[product("P4")]).await.map(|_| ()),
            catalog.update_items(&[product("P1")]).await,
            catalog.delete_items(&ids).await,
            catalog
                .create_property(&Property::new("size", "Size", "main"))
                .await
                .map(|_| ()),
            catalog
                .update_properties(&[Property::new("color", "Colour", "main")])
                .await,
            catalog.delete_properties(&["color".to_string()]).await,
            catalog
                .create_category(&Category::new("cases", "CAS", "Cases", "main"))
                .await
                .map(|_| ()),
            catalog
                .create_categories(&[Category::new("cables", "CAB", "Cables", "main")])
                .await
                .map(|_| ()),
            catalog
                .update_categories(&[Category::new("phones", "PHN", "Mobiles", "main")])
                .await,
            catalog.delete_categories(&["phones".to_string()]).await,
            catalog
                .create_catalog(&Catalog::new("other", "Other"))
                .await
                .map(|_| ()),
            catalog
                .update_catalogs(&[Catalog::new("main", "Renamed")])
                .await,
            catalog.delete_catalogs(&["main".to_string()]).await,
        ];

        for (index, result) in writes.iter().enumerate() {
            assert!(
                matches!(result, Err(ServiceError::ConnectionFailed(_))),
                "write #{index} should fail"
            );
        }
        assert_eq!(services.writes.load(Ordering::SeqCst), writes.len());
        assert_eq!(cache.clear_calls.load(Ordering::SeqCst), 0);

        read_all(&catalog).await;
        assert_eq!(services.reads.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_failed_read_is_not_cached() {
        let (services, _cache, catalog) = decorator().await;

        services.fail_reads.store(true, Ordering::SeqCst);
        let failed = catalog.get_catalog("main").await;
        assert!(matches!(failed, Err(ServiceError::ConnectionFailed(_))));

        services.fail_reads.store(false, Ordering::SeqCst);
        let found = catalog.get_catalog("main").await.unwrap();

        assert_eq!(found.map(|c| c.id), Some("main".to_string()));
        assert_eq!(services.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cache_failure_surfaces_without_calling_service() {
        let (services, cache, catalog) = decorator().await;
        cache.fail_get.store(true, Ordering::SeqCst);

        let result = catalog
            .get_item("P1", ItemResponseGroup::ItemInfo, None)
            .await;

        assert!(matches!(result, Err(ServiceError::Cache(_))));
        assert_eq!(services.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_failure_after_write_is_reported() {
        let (services, cache, catalog) = decorator().await;
        cache.fail_clear.store(true, Ordering::SeqCst);

        let result = catalog
            .create_item(&CatalogProduct::new("P9", "SKU-9", "Case", "main"))
            .await;

        assert!(matches!(result, Err(ServiceError::Cache(_))));
        assert_eq!(services.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_on_demand() {
        let (services, cache, catalog) = decorator().await;

        catalog.list_catalogs().await.unwrap();
        catalog.clear_cache().await.unwrap();
        catalog.list_catalogs().await.unwrap();

        assert_eq!(services.reads.load(Ordering::SeqCst), 2);
        assert_eq!(cache.clear_calls.load(Ordering::SeqCst), 1);

        let stats = catalog.cache_stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.region_clears, 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads_hit_service_once() {
        let (services, _cache, catalog) = decorator().await;

        let (a, b) = tokio::join!(catalog.list_catalogs(), catalog.list_catalogs());

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(services.reads.load(Ordering::SeqCst), 1);
    }
}
