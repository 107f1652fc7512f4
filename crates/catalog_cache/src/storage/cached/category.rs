use async_trait::async_trait;

use catalog_cache_core::cache::{categories_key, category_key, Cache};
use catalog_cache_core::catalog::{Category, CategoryResponseGroup};
use catalog_cache_core::services::{CategoryService, Result};

use super::CatalogServicesDecorator;

#[async_trait]
impl<C> CategoryService for CatalogServicesDecorator<C>
where
    C: Cache + 'static,
{
    async fn get_categories(
        &self,
        ids: &[String],
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<Category>> {
        self.cached(categories_key(ids, group, catalog_id), || {
            self.categories.get_categories(ids, group, catalog_id)
        })
        .await
    }

    async fn get_category(
        &self,
        id: &str,
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<Category>> {
        self.cached(category_key(id, group, catalog_id), || {
            self.categories.get_category(id, group, catalog_id)
        })
        .await
    }

    async fn create_category(&self, category: &Category) -> Result<Category> {
        let created = self.categories.create_category(category).await?;
        self.invalidate("CategoryService.Create").await?;
        Ok(created)
    }

    async fn create_categories(&self, categories: &[Category]) -> Result<Vec<Category>> {
        let created = self.categories.create_categories(categories).await?;
        self.invalidate("CategoryService.Create").await?;
        Ok(created)
    }

    async fn update_categories(&self, categories: &[Category]) -> Result<()> {
        self.categories.update_categories(categories).await?;
        self.invalidate("CategoryService.Update").await
    }

    async fn delete_categories(&self, ids: &[String]) -> Result<()> {
        self.categories.delete_categories(ids).await?;
        self.invalidate("CategoryService.Delete").await
    }
}
