use async_trait::async_trait;

use catalog_cache_core::cache::{
    all_properties_key, catalog_properties_key, dictionary_values_key, properties_key,
    property_key, Cache,
};
use catalog_cache_core::catalog::{Property, PropertyDictionaryValue};
use catalog_cache_core::services::{PropertyService, Result};

use super::CatalogServicesDecorator;

#[async_trait]
impl<C> PropertyService for CatalogServicesDecorator<C>
where
    C: Cache + 'static,
{
    async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        self.cached(property_key(id), || self.properties.get_property(id))
            .await
    }

    async fn get_properties(&self, ids: &[String]) -> Result<Vec<Property>> {
        self.cached(properties_key(ids), || self.properties.get_properties(ids))
            .await
    }

    async fn get_catalog_properties(&self, catalog_id: &str) -> Result<Vec<Property>> {
        self.cached(catalog_properties_key(catalog_id), || {
            self.properties.get_catalog_properties(catalog_id)
        })
        .await
    }

    async fn get_all_properties(&self) -> Result<Vec<Property>> {
        self.cached(all_properties_key(), || self.properties.get_all_properties())
            .await
    }

    async fn search_dictionary_values(
        &self,
        property_id: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<PropertyDictionaryValue>> {
        self.cached(dictionary_values_key(property_id, keyword), || {
            self.properties.search_dictionary_values(property_id, keyword)
        })
        .await
    }

    async fn create_property(&self, property: &Property) -> Result<Property> {
        let created = self.properties.create_property(property).await?;
        self.invalidate("PropertyService.Create").await?;
        Ok(created)
    }

    async fn update_properties(&self, properties: &[Property]) -> Result<()> {
        self.properties.update_properties(properties).await?;
        self.invalidate("PropertyService.Update").await
    }

    async fn delete_properties(&self, ids: &[String]) -> Result<()> {
        self.properties.delete_properties(ids).await?;
        self.invalidate("PropertyService.Delete").await
    }
}
