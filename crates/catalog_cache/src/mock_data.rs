use catalog_cache_core::catalog::{
    Catalog, CatalogProduct, Category, Property, PropertyDictionaryValue, PropertyValue,
    PropertyValueType,
};
use catalog_cache_core::services::{CatalogService, CategoryService, ItemService, PropertyService};

use crate::storage::InMemoryCatalogStore;

/// Catalog ids used by the demo data.
pub const DEMO_CATALOG_ID: &str = "electronics";
pub const DEMO_OUTLET_ID: &str = "outlet";

/// Builds the demo catalogs.
pub fn generate_catalogs() -> Vec<Catalog> {
    vec![
        Catalog::new(DEMO_CATALOG_ID, "Electronics Store")
            .with_languages(vec!["en-US".to_string(), "es-UY".to_string()]),
        Catalog::new(DEMO_OUTLET_ID, "Outlet").virtual_catalog(),
    ]
}

/// Builds the demo category tree. Parents come before their children.
pub fn generate_categories() -> Vec<Category> {
    vec![
        Category::new("phones", "PHN", "Phones", DEMO_CATALOG_ID),
        Category::new("android", "AND", "Android Phones", DEMO_CATALOG_ID).with_parent("phones"),
        Category::new("iphone", "IPH", "iPhone", DEMO_CATALOG_ID).with_parent("phones"),
        Category::new("laptops", "LAP", "Laptops", DEMO_CATALOG_ID)
            .with_property_value(PropertyValue::new("Warranty", "2 years")),
        Category::new("accessories", "ACC", "Accessories", DEMO_CATALOG_ID),
        Category::new("clearance", "CLR", "Clearance", DEMO_OUTLET_ID),
    ]
}

/// Builds the demo property definitions.
pub fn generate_properties() -> Vec<Property> {
    vec![
        Property::new("color", "Color", DEMO_CATALOG_ID).with_dictionary(vec![
            PropertyDictionaryValue::new("color-black", "color", "Black", "Black"),
            PropertyDictionaryValue::new("color-white", "color", "White", "White"),
            PropertyDictionaryValue::new("color-blue", "color", "Blue", "Ocean Blue"),
        ]),
        Property::new("storage", "Storage (GB)", DEMO_CATALOG_ID)
            .with_value_type(PropertyValueType::Integer)
            .with_category("phones"),
        Property::new("screen", "Screen Size", DEMO_CATALOG_ID)
            .with_value_type(PropertyValueType::Number)
            .with_category("laptops"),
    ]
}

/// Builds the demo products. Variations follow their main product.
pub fn generate_products() -> Vec<CatalogProduct> {
    let color = |value: &str| PropertyValue::new("Color", value).for_property("color");

    vec![
        CatalogProduct::new("pixel-9", "SKU-PIX9", "Pixel 9", DEMO_CATALOG_ID)
            .with_category("android")
            .with_property_value(color("Black"))
            .with_property_value(PropertyValue::new("Storage (GB)", "128").for_property("storage")),
        CatalogProduct::new("pixel-9-white", "SKU-PIX9-W", "Pixel 9 White", DEMO_CATALOG_ID)
            .with_category("android")
            .with_main_product("pixel-9")
            .with_property_value(color("White")),
        CatalogProduct::new("galaxy-s24", "SKU-GS24", "Galaxy S24", DEMO_CATALOG_ID)
            .with_category("android")
            .with_property_value(color("Blue")),
        CatalogProduct::new("iphone-16", "SKU-IP16", "iPhone 16", DEMO_CATALOG_ID)
            .with_category("iphone")
            .with_property_value(color("Black")),
        CatalogProduct::new("thinkpad-x1", "SKU-TPX1", "ThinkPad X1 Carbon", DEMO_CATALOG_ID)
            .with_category("laptops")
            .with_property_value(PropertyValue::new("Screen Size", "14").for_property("screen")),
        CatalogProduct::new("usb-c-cable", "SKU-USBC", "USB-C Cable", DEMO_CATALOG_ID)
            .with_category("accessories"),
        CatalogProduct::new("phone-case", "SKU-CASE", "Phone Case", DEMO_CATALOG_ID),
    ]
}

/// Loads the demo catalog into an empty store.
pub async fn seed_demo_data(
    store: &InMemoryCatalogStore,
) -> Result<(), catalog_cache_core::services::ServiceError> {
    for catalog in generate_catalogs() {
        store.create_catalog(&catalog).await?;
    }
    store.create_categories(&generate_categories()).await?;
    for property in generate_properties() {
        store.create_property(&property).await?;
    }
    let products = store.create_items(&generate_products()).await?;

    tracing::info!(products = products.len(), "Demo catalog seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use catalog_cache_core::catalog::{ItemResponseGroup, SearchCriteria};
    use catalog_cache_core::services::CatalogSearchService;

    use super::*;

    #[tokio::test]
    async fn test_seed_demo_data() {
        let store = InMemoryCatalogStore::new();
        seed_demo_data(&store).await.unwrap();

        assert_eq!(store.list_catalogs().await.unwrap().len(), 2);
        assert_eq!(store.get_all_properties().await.unwrap().len(), 3);

        let pixel = store
            .get_item_by_code("SKU-PIX9", ItemResponseGroup::Full, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(pixel.id, "pixel-9");
    }

    #[tokio::test]
    async fn test_seeded_phone_tree_is_searchable() {
        let store = InMemoryCatalogStore::new();
        seed_demo_data(&store).await.unwrap();

        let result = store
            .search(&SearchCriteria::default().in_category("phones", true))
            .await
            .unwrap();

        assert_eq!(result.product_total_count, 4);
    }

    #[tokio::test]
    async fn test_seed_twice_fails() {
        let store = InMemoryCatalogStore::new();
        seed_demo_data(&store).await.unwrap();

        assert!(seed_demo_data(&store).await.is_err());
    }
}
