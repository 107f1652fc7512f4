use async_trait::async_trait;

use catalog_cache_core::cache::{item_by_code_key, item_key, items_by_codes_key, items_key, Cache};
use catalog_cache_core::catalog::{CatalogProduct, ItemResponseGroup};
use catalog_cache_core::services::{ItemService, Result};

use super::CatalogServicesDecorator;

#[async_trait]
impl<C> ItemService for CatalogServicesDecorator<C>
where
    C: Cache + 'static,
{
    async fn get_item(
        &self,
        id: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>> {
        self.cached(item_key(id, group, catalog_id), || {
            self.items.get_item(id, group, catalog_id)
        })
        .await
    }

    async fn get_items(
        &self,
        ids: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>> {
        self.cached(items_key(ids, group, catalog_id), || {
            self.items.get_items(ids, group, catalog_id)
        })
        .await
    }

    async fn get_item_by_code(
        &self,
        code: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>> {
        self.cached(item_by_code_key(code, group, catalog_id), || {
            self.items.get_item_by_code(code, group, catalog_id)
        })
        .await
    }

    async fn get_items_by_codes(
        &self,
        codes: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>> {
        self.cached(items_by_codes_key(codes, group, catalog_id), || {
            self.items.get_items_by_codes(codes, group, catalog_id)
        })
        .await
    }

    async fn create_item(&self, item: &CatalogProduct) -> Result<CatalogProduct> {
        let created = self.items.create_item(item).await?;
        self.invalidate("ItemService.Create").await?;
        Ok(created)
    }

    async fn create_items(&self, items: &[CatalogProduct]) -> Result<Vec<CatalogProduct>> {
        let created = self.items.create_items(items).await?;
        self.invalidate("ItemService.Create").await?;
        Ok(created)
    }

    async fn update_items(&self, items: &[CatalogProduct]) -> Result<()> {
        self.items.update_items(items).await?;
        self.invalidate("ItemService.Update").await
    }

    async fn delete_items(&self, ids: &[String]) -> Result<()> {
        self.items.delete_items(ids).await?;
        self.invalidate("ItemService.Delete").await
    }
}
