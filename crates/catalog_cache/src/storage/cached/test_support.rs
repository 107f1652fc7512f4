//! Mocks shared by the decorator tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use catalog_cache_core::cache::{Cache, CacheError, CacheManager, Result as CacheResult};
use catalog_cache_core::catalog::{
    Catalog, CatalogProduct, Category, CategoryResponseGroup, ItemResponseGroup, Property,
    PropertyDictionaryValue, SearchCriteria, SearchResult,
};
use catalog_cache_core::services::{
    CatalogSearchService, CatalogService, CategoryService, ItemService, PropertyService, Result,
    ServiceError,
};

use crate::cache::MemoryCache;
use crate::storage::inmemory::InMemoryCatalogStore;

use super::CatalogServicesDecorator;

/// Catalog services that count calls and can be told to fail.
#[derive(Default)]
pub(super) struct MockCatalogServices {
    pub store: InMemoryCatalogStore,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MockCatalogServices {
    fn read(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ServiceError::ConnectionFailed("read refused".to_string()));
        }
        Ok(())
    }

    fn write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::ConnectionFailed("write refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemService for MockCatalogServices {
    async fn get_item(
        &self,
        id: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>> {
        self.read()?;
        self.store.get_item(id, group, catalog_id).await
    }

    async fn get_items(
        &self,
        ids: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>> {
        self.read()?;
        self.store.get_items(ids, group, catalog_id).await
    }

    async fn get_item_by_code(
        &self,
        code: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>> {
        self.read()?;
        self.store.get_item_by_code(code, group, catalog_id).await
    }

    async fn get_items_by_codes(
        &self,
        codes: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>> {
        self.read()?;
        self.store.get_items_by_codes(codes, group, catalog_id).await
    }

    async fn create_item(&self, item: &CatalogProduct) -> Result<CatalogProduct> {
        self.write()?;
        self.store.create_item(item).await
    }

    async fn create_items(&self, items: &[CatalogProduct]) -> Result<Vec<CatalogProduct>> {
        self.write()?;
        self.store.create_items(items).await
    }

    async fn update_items(&self, items: &[CatalogProduct]) -> Result<()> {
        self.write()?;
        self.store.update_items(items).await
    }

    async fn delete_items(&self, ids: &[String]) -> Result<()> {
        self.write()?;
        self.store.delete_items(ids).await
    }
}

#[async_trait]
impl CatalogSearchService for MockCatalogServices {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        self.read()?;
        self.store.search(criteria).await
    }
}

#[async_trait]
impl PropertyService for MockCatalogServices {
    async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        self.read()?;
        self.store.get_property(id).await
    }

    async fn get_properties(&self, ids: &[String]) -> Result<Vec<Property>> {
        self.read()?;
        self.store.get_properties(ids).await
    }

    async fn get_catalog_properties(&self, catalog_id: &str) -> Result<Vec<Property>> {
        self.read()?;
        self.store.get_catalog_properties(catalog_id).await
    }

    async fn get_all_properties(&self) -> Result<Vec<Property>> {
        self.read()?;
        self.store.get_all_properties().await
    }

    async fn search_dictionary_values(
        &self,
        property_id: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<PropertyDictionaryValue>> {
        self.read()?;
        self.store.search_dictionary_values(property_id, keyword).await
    }

    async fn create_property(&self, property: &Property) -> Result<Property> {
        self.write()?;
        self.store.create_property(property).await
    }

    async fn update_properties(&self, properties: &[Property]) -> Result<()> {
        self.write()?;
        self.store.update_properties(properties).await
    }

    async fn delete_properties(&self, ids: &[String]) -> Result<()> {
        self.write()?;
        self.store.delete_properties(ids).await
    }
}

#[async_trait]
impl CategoryService for MockCatalogServices {
    async fn get_categories(
        &self,
        ids: &[String],
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<Category>> {
        self.read()?;
        self.store.get_categories(ids, group, catalog_id).await
    }

    async fn get_category(
        &self,
        id: &str,
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<Category>> {
        self.read()?;
        self.store.get_category(id, group, catalog_id).await
    }

    async fn create_category(&self, category: &Category) -> Result<Category> {
        self.write()?;
        self.store.create_category(category).await
    }

    async fn create_categories(&self, categories: &[Category]) -> Result<Vec<Category>> {
        self.write()?;
        self.store.create_categories(categories).await
    }

    async fn update_categories(&self, categories: &[Category]) -> Result<()> {
        self.write()?;
        self.store.update_categories(categories).await
    }

    async fn delete_categories(&self, ids: &[String]) -> Result<()> {
        self.write()?;
        self.store.delete_categories(ids).await
    }
}

#[async_trait]
impl CatalogService for MockCatalogServices {
    async fn list_catalogs(&self) -> Result<Vec<Catalog>> {
        self.read()?;
        self.store.list_catalogs().await
    }

    async fn get_catalog(&self, id: &str) -> Result<Option<Catalog>> {
        self.read()?;
        self.store.get_catalog(id).await
    }

    async fn create_catalog(&self, catalog: &Catalog) -> Result<Catalog> {
        self.write()?;
        self.store.create_catalog(catalog).await
    }

    async fn update_catalogs(&self, catalogs: &[Catalog]) -> Result<()> {
        self.write()?;
        self.store.update_catalogs(catalogs).await
    }

    async fn delete_catalogs(&self, ids: &[String]) -> Result<()> {
        self.write()?;
        self.store.delete_catalogs(ids).await
    }
}

/// Memory cache that counts region clears and can be told to fail.
pub(super) struct MockCache {
    inner: MemoryCache,
    pub clear_calls: AtomicUsize,
    pub fail_get: AtomicBool,
    pub fail_clear: AtomicBool,
}

impl MockCache {
    fn new() -> Self {
        Self {
            inner: MemoryCache::new(1_000),
            clear_calls: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_clear: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Cache for MockCache {
    async fn get(&self, region: &str, key: &str) -> CacheResult<Option<Vec<u8>>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("cache offline".to_string()));
        }
        self.inner.get(region, key).await
    }

    async fn set(
        &self,
        region: &str,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        self.inner.set(region, key, value, ttl).await
    }

    async fn clear_region(&self, region: &str) -> CacheResult<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(CacheError::OperationFailed("clear refused".to_string()));
        }
        self.inner.clear_region(region).await
    }
}

/// A product in the seeded `main` catalog, filed under `phones`.
pub(super) fn product(id: &str) -> CatalogProduct {
    CatalogProduct::new(id, format!("SKU-{id}"), format!("Product {id}"), "main")
        .with_category("phones")
}

/// Builds a decorator over seeded mock services and a counting cache.
pub(super) async fn decorator() -> (
    Arc<MockCatalogServices>,
    Arc<MockCache>,
    CatalogServicesDecorator<MockCache>,
) {
    let services = Arc::new(MockCatalogServices::default());
    let store = &services.store;
    store
        .create_catalog(&Catalog::new("main", "Main"))
        .await
        .expect("seed catalog");
    store
        .create_category(&Category::new("phones", "PHN", "Phones", "main"))
        .await
        .expect("seed category");
    store
        .create_items(&[product("P1"), product("P2")])
        .await
        .expect("seed products");
    store
        .create_property(&Property::new("color", "Color", "main").with_dictionary(vec![
            PropertyDictionaryValue::new("red", "color", "Red", "Red"),
            PropertyDictionaryValue::new("blue", "color", "Blue", "Blue"),
        ]))
        .await
        .expect("seed property");

    let cache = Arc::new(MockCache::new());
    let manager = Arc::new(CacheManager::new(cache.clone(), None));
    let decorator = CatalogServicesDecorator::new(
        services.clone(),
        services.clone(),
        services.clone(),
        services.clone(),
        services.clone(),
        manager,
    );

    (services, cache, decorator)
}
