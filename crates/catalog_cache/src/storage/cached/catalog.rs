use async_trait::async_trait;

use catalog_cache_core::cache::{catalog_key, catalogs_list_key, Cache};
use catalog_cache_core::catalog::Catalog;
use catalog_cache_core::services::{CatalogService, Result};

use super::CatalogServicesDecorator;

#[async_trait]
impl<C> CatalogService for CatalogServicesDecorator<C>
where
    C: Cache + 'static,
{
    async fn list_catalogs(&self) -> Result<Vec<Catalog>> {
        self.cached(catalogs_list_key(), || self.catalogs.list_catalogs())
            .await
    }

    async fn get_catalog(&self, id: &str) -> Result<Option<Catalog>> {
        self.cached(catalog_key(id), || self.catalogs.get_catalog(id))
            .await
    }

    async fn create_catalog(&self, catalog: &Catalog) -> Result<Catalog> {
        let created = self.catalogs.create_catalog(catalog).await?;
        self.invalidate("CatalogService.Create").await?;
        Ok(created)
    }

    async fn update_catalogs(&self, catalogs: &[Catalog]) -> Result<()> {
        self.catalogs.update_catalogs(catalogs).await?;
        self.invalidate("CatalogService.Update").await
    }

    async fn delete_catalogs(&self, ids: &[String]) -> Result<()> {
        self.catalogs.delete_catalogs(ids).await?;
        self.invalidate("CatalogService.Delete").await
    }
}
