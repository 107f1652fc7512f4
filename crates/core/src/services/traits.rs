use async_trait::async_trait;

use crate::cache::{self, CacheStats};
use crate::catalog::{
    Catalog, CatalogProduct, Category, CategoryResponseGroup, ItemResponseGroup, Property,
    PropertyDictionaryValue, SearchCriteria, SearchResult,
};

use super::Result;

/// Product lookup and maintenance.
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Gets a product by id. With `catalog_id`, the product must belong to that catalog.
    async fn get_item(
        &self,
        id: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>>;

    /// Gets the products with the given ids, in request order. Unknown ids are skipped.
    async fn get_items(
        &self,
        ids: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>>;

    /// Gets a product by its code.
    async fn get_item_by_code(
        &self,
        code: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>>;

    /// Gets the products with the given codes, in request order.
    async fn get_items_by_codes(
        &self,
        codes: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>>;

    /// Creates a product and returns it as stored.
    async fn create_item(&self, item: &CatalogProduct) -> Result<CatalogProduct>;

    /// Creates several products at once.
    async fn create_items(&self, items: &[CatalogProduct]) -> Result<Vec<CatalogProduct>>;

    /// Replaces existing products. Fails without changes if any is missing.
    async fn update_items(&self, items: &[CatalogProduct]) -> Result<()>;

    /// Deletes products by id.
    async fn delete_items(&self, ids: &[String]) -> Result<()>;
}

/// Keyword and scope search over products and categories.
#[async_trait]
pub trait CatalogSearchService: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult>;
}

/// Property definitions and dictionary values.
#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn get_property(&self, id: &str) -> Result<Option<Property>>;

    async fn get_properties(&self, ids: &[String]) -> Result<Vec<Property>>;

    /// Gets every property defined on a catalog or on any of its categories.
    async fn get_catalog_properties(&self, catalog_id: &str) -> Result<Vec<Property>>;

    async fn get_all_properties(&self) -> Result<Vec<Property>>;

    /// Searches the dictionary values of a property. `None` returns all of them.
    async fn search_dictionary_values(
        &self,
        property_id: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<PropertyDictionaryValue>>;

    async fn create_property(&self, property: &Property) -> Result<Property>;

    async fn update_properties(&self, properties: &[Property]) -> Result<()>;

    async fn delete_properties(&self, ids: &[String]) -> Result<()>;
}

/// Category lookup and maintenance.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn get_categories(
        &self,
        ids: &[String],
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<Category>>;

    async fn get_category(
        &self,
        id: &str,
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<Category>>;

    async fn create_category(&self, category: &Category) -> Result<Category>;

    async fn create_categories(&self, categories: &[Category]) -> Result<Vec<Category>>;

    async fn update_categories(&self, categories: &[Category]) -> Result<()>;

    /// Deletes categories and everything below them.
    async fn delete_categories(&self, ids: &[String]) -> Result<()>;
}

/// Catalog lookup and maintenance.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_catalogs(&self) -> Result<Vec<Catalog>>;

    async fn get_catalog(&self, id: &str) -> Result<Option<Catalog>>;

    async fn create_catalog(&self, catalog: &Catalog) -> Result<Catalog>;

    async fn update_catalogs(&self, catalogs: &[Catalog]) -> Result<()>;

    /// Deletes catalogs together with their categories, products and properties.
    async fn delete_catalogs(&self, ids: &[String]) -> Result<()>;
}

/// Control surface of a caching decorator.
#[async_trait]
pub trait CachedServiceDecorator: Send + Sync {
    /// Drops every cached catalog read.
    async fn clear_cache(&self) -> cache::Result<()>;

    fn cache_stats(&self) -> CacheStats;
}
