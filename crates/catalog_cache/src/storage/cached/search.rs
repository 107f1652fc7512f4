use async_trait::async_trait;

use catalog_cache_core::cache::{search_key, Cache};
use catalog_cache_core::catalog::{SearchCriteria, SearchResult};
use catalog_cache_core::services::{CatalogSearchService, Result};

use super::CatalogServicesDecorator;

#[async_trait]
impl<C> CatalogSearchService for CatalogServicesDecorator<C>
where
    C: Cache + 'static,
{
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        self.cached(search_key(criteria), || self.search.search(criteria))
            .await
    }
}
