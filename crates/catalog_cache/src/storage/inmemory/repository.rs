//! In-memory catalog store implementing every catalog service.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use catalog_cache_core::catalog::{
    category_matches, descendant_category_ids, paginate, product_matches, validate_catalog,
    validate_category, validate_product, validate_property, Catalog, CatalogProduct, Category,
    CategoryResponseGroup, ItemResponseGroup, Property, PropertyDictionaryValue, SearchCriteria,
    SearchResult,
};
use catalog_cache_core::services::{
    CatalogSearchService, CatalogService, CategoryService, ItemService, PropertyService, Result,
    ServiceError,
};

const CATALOG: &str = "Catalog";
const CATEGORY: &str = "Category";
const PRODUCT: &str = "CatalogProduct";
const PROPERTY: &str = "Property";

fn not_found(entity_type: &'static str, id: &str) -> ServiceError {
    ServiceError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}

fn already_exists(entity_type: &'static str, id: &str) -> ServiceError {
    ServiceError::AlreadyExists {
        entity_type,
        id: id.to_string(),
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Default)]
struct CatalogData {
    catalogs: BTreeMap<String, Catalog>,
    categories: BTreeMap<String, Category>,
    products: BTreeMap<String, CatalogProduct>,
    properties: BTreeMap<String, Property>,
}

impl CatalogData {
    fn product_in(&self, id: &str, catalog_id: Option<&str>) -> Option<&CatalogProduct> {
        self.products
            .get(id)
            .filter(|p| catalog_id.is_none_or(|c| p.catalog_id == c))
    }

    fn category_in(&self, id: &str, catalog_id: Option<&str>) -> Option<&Category> {
        self.categories
            .get(id)
            .filter(|c| catalog_id.is_none_or(|cat| c.catalog_id == cat))
    }

    /// Ancestor ids of a category, root first.
    fn parents_of(&self, category: &Category) -> Vec<String> {
        let mut parents = Vec::new();
        let mut seen = HashSet::from([category.id.clone()]);
        let mut current = category.parent_id.clone();

        while let Some(id) = current {
            if !seen.insert(id.clone()) {
                break;
            }
            current = self.categories.get(&id).and_then(|c| c.parent_id.clone());
            parents.push(id);
        }

        parents.reverse();
        parents
    }

    fn shape_category(&self, category: &Category, group: CategoryResponseGroup) -> Category {
        let mut shaped = category.clone();
        if group.includes_parents() {
            shaped.parents = self.parents_of(category);
        }
        shaped.shaped(group)
    }

    fn check_catalog(&self, catalog_id: &str) -> Result<()> {
        if self.catalogs.contains_key(catalog_id) {
            Ok(())
        } else {
            Err(not_found(CATALOG, catalog_id))
        }
    }

    fn check_product(&self, product: &CatalogProduct) -> Result<()> {
        validate_product(product)?;
        self.check_catalog(&product.catalog_id)?;
        if let Some(category_id) = &product.category_id {
            if self.category_in(category_id, Some(&product.catalog_id)).is_none() {
                return Err(ServiceError::InvalidData(format!(
                    "Category {category_id} is not in catalog {}",
                    product.catalog_id
                )));
            }
        }
        Ok(())
    }

    fn check_code_free(&self, product: &CatalogProduct) -> Result<()> {
        let taken = self
            .products
            .values()
            .any(|p| p.code == product.code && p.id != product.id);
        if taken {
            return Err(already_exists(PRODUCT, &product.code));
        }
        Ok(())
    }

    fn check_category(&self, category: &Category) -> Result<()> {
        validate_category(category)?;
        self.check_catalog(&category.catalog_id)?;
        let Some(parent_id) = &category.parent_id else {
            return Ok(());
        };
        let Some(parent) = self.category_in(parent_id, Some(&category.catalog_id)) else {
            return Err(ServiceError::InvalidData(format!(
                "Parent category {parent_id} is not in catalog {}",
                category.catalog_id
            )));
        };
        if self.parents_of(parent).contains(&category.id) {
            return Err(ServiceError::InvalidData(format!(
                "Moving category {} under {parent_id} creates a cycle",
                category.id
            )));
        }
        Ok(())
    }

    fn check_property(&self, property: &Property) -> Result<()> {
        validate_property(property)?;
        if let Some(catalog_id) = &property.catalog_id {
            self.check_catalog(catalog_id)?;
        }
        if let Some(category_id) = &property.category_id {
            if self
                .category_in(category_id, property.catalog_id.as_deref())
                .is_none()
            {
                return Err(not_found(CATEGORY, category_id));
            }
        }
        Ok(())
    }

    fn insert_product(&mut self, mut product: CatalogProduct) -> CatalogProduct {
        if product.id.is_empty() {
            product.id = new_id();
        }
        let now = Utc::now();
        product.created_date = Some(now);
        product.modified_date = Some(now);
        self.products.insert(product.id.clone(), product.clone());
        product
    }

    fn insert_category(&mut self, mut category: Category) -> Category {
        if category.id.is_empty() {
            category.id = new_id();
        }
        category.parents.clear();
        category.modified_date = Some(Utc::now());
        self.categories.insert(category.id.clone(), category.clone());
        category
    }

    /// Removes categories and their subtrees. Products are detached, scoped properties dropped.
    fn remove_categories(&mut self, ids: &[String]) -> usize {
        let all: Vec<Category> = self.categories.values().cloned().collect();
        let mut doomed = HashSet::new();
        for id in ids.iter().filter(|id| self.categories.contains_key(*id)) {
            doomed.extend(descendant_category_ids(&all, id));
        }

        for id in &doomed {
            self.categories.remove(id);
        }
        for product in self.products.values_mut() {
            if product
                .category_id
                .as_ref()
                .is_some_and(|id| doomed.contains(id))
            {
                product.category_id = None;
                product.modified_date = Some(Utc::now());
            }
        }
        self.properties.retain(|_, p| {
            p.category_id
                .as_ref()
                .is_none_or(|id| !doomed.contains(id))
        });

        doomed.len()
    }

    fn remove_products(&mut self, ids: &[String]) -> usize {
        let doomed: HashSet<&String> = ids.iter().collect();
        let before = self.products.len();
        // Variations go with their main product.
        self.products.retain(|id, p| {
            !doomed.contains(id)
                && p.main_product_id
                    .as_ref()
                    .is_none_or(|main| !doomed.contains(main))
        });
        before - self.products.len()
    }
}

/// In-memory catalog backend.
///
/// Implements all five catalog services over one shared data set, so a
/// change made through one facet (deleting a catalog, say) is visible
/// through the others.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    data: Arc<RwLock<CatalogData>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemService for InMemoryCatalogStore {
    async fn get_item(
        &self,
        id: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>> {
        let data = self.data.read().await;
        Ok(data
            .product_in(id, catalog_id)
            .map(|p| p.clone().shaped(group)))
    }

    async fn get_items(
        &self,
        ids: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>> {
        let data = self.data.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.product_in(id, catalog_id))
            .map(|p| p.clone().shaped(group))
            .collect())
    }

    async fn get_item_by_code(
        &self,
        code: &str,
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<CatalogProduct>> {
        let data = self.data.read().await;
        Ok(data
            .products
            .values()
            .find(|p| p.code == code && catalog_id.is_none_or(|c| p.catalog_id == c))
            .map(|p| p.clone().shaped(group)))
    }

    async fn get_items_by_codes(
        &self,
        codes: &[String],
        group: ItemResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<CatalogProduct>> {
        let data = self.data.read().await;
        Ok(codes
            .iter()
            .filter_map(|code| {
                data.products
                    .values()
                    .find(|p| &p.code == code && catalog_id.is_none_or(|c| p.catalog_id == c))
            })
            .map(|p| p.clone().shaped(group))
            .collect())
    }

    async fn create_item(&self, item: &CatalogProduct) -> Result<CatalogProduct> {
        let mut created = self.create_items(std::slice::from_ref(item)).await?;
        created
            .pop()
            .ok_or_else(|| ServiceError::QueryFailed("product was not created".to_string()))
    }

    async fn create_items(&self, items: &[CatalogProduct]) -> Result<Vec<CatalogProduct>> {
        let mut data = self.data.write().await;

        let mut batch_ids = HashSet::new();
        let mut batch_codes = HashSet::new();
        for item in items {
            data.check_product(item)?;
            if !item.id.is_empty()
                && (data.products.contains_key(&item.id) || !batch_ids.insert(item.id.as_str()))
            {
                return Err(already_exists(PRODUCT, &item.id));
            }
            data.check_code_free(item)?;
            if !batch_codes.insert(item.code.as_str()) {
                return Err(already_exists(PRODUCT, &item.code));
            }
        }

        let created: Vec<CatalogProduct> = items
            .iter()
            .map(|item| data.insert_product(item.clone()))
            .collect();

        tracing::debug!(count = created.len(), "Products created");
        Ok(created)
    }

    async fn update_items(&self, items: &[CatalogProduct]) -> Result<()> {
        let mut data = self.data.write().await;

        let mut batch_codes = HashSet::new();
        for item in items {
            if !data.products.contains_key(&item.id) {
                return Err(not_found(PRODUCT, &item.id));
            }
            data.check_product(item)?;
            data.check_code_free(item)?;
            if !batch_codes.insert(item.code.as_str()) {
                return Err(already_exists(PRODUCT, &item.code));
            }
        }

        let now = Utc::now();
        for item in items {
            let created_date = data.products.get(&item.id).and_then(|p| p.created_date);
            let mut updated = item.clone();
            updated.created_date = created_date;
            updated.modified_date = Some(now);
            data.products.insert(updated.id.clone(), updated);
        }

        tracing::debug!(count = items.len(), "Products updated");
        Ok(())
    }

    async fn delete_items(&self, ids: &[String]) -> Result<()> {
        let removed = self.data.write().await.remove_products(ids);
        tracing::debug!(requested = ids.len(), removed, "Products deleted");
        Ok(())
    }
}

#[async_trait]
impl CatalogSearchService for InMemoryCatalogStore {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let data = self.data.read().await;

        let scope = criteria.category_id.as_deref().map(|root| {
            if criteria.search_in_children {
                let all: Vec<Category> = data.categories.values().cloned().collect();
                descendant_category_ids(&all, root)
            } else {
                HashSet::from([root.to_string()])
            }
        });

        let mut result = SearchResult::default();

        if criteria.response_group.includes_products() {
            let matched: Vec<CatalogProduct> = data
                .products
                .values()
                .filter(|p| product_matches(p, criteria, scope.as_ref()))
                .map(|p| p.clone().shaped(criteria.item_response_group))
                .collect();
            result.product_total_count = matched.len();
            result.products = paginate(matched, criteria.skip, criteria.take);
        }

        if criteria.response_group.includes_categories() {
            // Without `search_in_children` only direct children are listed.
            let direct_only = criteria.category_id.is_some() && !criteria.search_in_children;
            result.categories = data
                .categories
                .values()
                .filter(|c| {
                    if direct_only {
                        c.parent_id == criteria.category_id
                            && category_matches(c, criteria, None)
                    } else {
                        category_matches(c, criteria, scope.as_ref())
                    }
                })
                .cloned()
                .collect();
        }

        Ok(result)
    }
}

#[async_trait]
impl PropertyService for InMemoryCatalogStore {
    async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        Ok(self.data.read().await.properties.get(id).cloned())
    }

    async fn get_properties(&self, ids: &[String]) -> Result<Vec<Property>> {
        let data = self.data.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.properties.get(id))
            .cloned()
            .collect())
    }

    async fn get_catalog_properties(&self, catalog_id: &str) -> Result<Vec<Property>> {
        let data = self.data.read().await;
        data.check_catalog(catalog_id)?;
        Ok(data
            .properties
            .values()
            .filter(|p| p.catalog_id.as_deref() == Some(catalog_id))
            .cloned()
            .collect())
    }

    async fn get_all_properties(&self) -> Result<Vec<Property>> {
        Ok(self.data.read().await.properties.values().cloned().collect())
    }

    async fn search_dictionary_values(
        &self,
        property_id: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<PropertyDictionaryValue>> {
        let data = self.data.read().await;
        let property = data
            .properties
            .get(property_id)
            .ok_or_else(|| not_found(PROPERTY, property_id))?;

        Ok(property
            .dictionary_values
            .iter()
            .filter(|v| keyword.is_none_or(|k| v.matches(k)))
            .cloned()
            .collect())
    }

    async fn create_property(&self, property: &Property) -> Result<Property> {
        let mut data = self.data.write().await;

        data.check_property(property)?;
        if data.properties.contains_key(&property.id) {
            return Err(already_exists(PROPERTY, &property.id));
        }

        let mut created = property.clone();
        if created.id.is_empty() {
            created.id = new_id();
        }
        for value in &mut created.dictionary_values {
            value.property_id = created.id.clone();
            if value.id.is_empty() {
                value.id = new_id();
            }
        }

        data.properties.insert(created.id.clone(), created.clone());
        tracing::debug!(property_id = %created.id, "Property created");
        Ok(created)
    }

    async fn update_properties(&self, properties: &[Property]) -> Result<()> {
        let mut data = self.data.write().await;

        for property in properties {
            if !data.properties.contains_key(&property.id) {
                return Err(not_found(PROPERTY, &property.id));
            }
            data.check_property(property)?;
        }
        for property in properties {
            data.properties
                .insert(property.id.clone(), property.clone());
        }

        tracing::debug!(count = properties.len(), "Properties updated");
        Ok(())
    }

    async fn delete_properties(&self, ids: &[String]) -> Result<()> {
        let mut data = self.data.write().await;
        for id in ids {
            data.properties.remove(id);
        }
        tracing::debug!(requested = ids.len(), "Properties deleted");
        Ok(())
    }
}

#[async_trait]
impl CategoryService for InMemoryCatalogStore {
    async fn get_categories(
        &self,
        ids: &[String],
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Vec<Category>> {
        let data = self.data.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.category_in(id, catalog_id))
            .map(|c| data.shape_category(c, group))
            .collect())
    }

    async fn get_category(
        &self,
        id: &str,
        group: CategoryResponseGroup,
        catalog_id: Option<&str>,
    ) -> Result<Option<Category>> {
        let data = self.data.read().await;
        Ok(data
            .category_in(id, catalog_id)
            .map(|c| data.shape_category(c, group)))
    }

    async fn create_category(&self, category: &Category) -> Result<Category> {
        let mut created = self
            .create_categories(std::slice::from_ref(category))
            .await?;
        created
            .pop()
            .ok_or_else(|| ServiceError::QueryFailed("category was not created".to_string()))
    }

    async fn create_categories(&self, categories: &[Category]) -> Result<Vec<Category>> {
        let mut data = self.data.write().await;

        // Parents may be created in the same batch, so insert as we go and
        // roll back on failure.
        let mut created: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            let checked = if !category.id.is_empty() && data.categories.contains_key(&category.id)
            {
                Err(already_exists(CATEGORY, &category.id))
            } else {
                data.check_category(category)
            };

            if let Err(err) = checked {
                for done in &created {
                    data.categories.remove(&done.id);
                }
                return Err(err);
            }
            created.push(data.insert_category(category.clone()));
        }

        tracing::debug!(count = created.len(), "Categories created");
        Ok(created)
    }

    async fn update_categories(&self, categories: &[Category]) -> Result<()> {
        let mut data = self.data.write().await;

        for category in categories {
            if !data.categories.contains_key(&category.id) {
                return Err(not_found(CATEGORY, &category.id));
            }
        }

        // Each entry is checked against the tree with the earlier entries
        // already applied, so a batch cannot build a cycle between its members.
        let now = Utc::now();
        let mut replaced: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if let Err(err) = data.check_category(category) {
                for previous in replaced.into_iter().rev() {
                    data.categories.insert(previous.id.clone(), previous);
                }
                return Err(err);
            }

            let mut updated = category.clone();
            updated.parents.clear();
            updated.modified_date = Some(now);
            if let Some(previous) = data.categories.insert(updated.id.clone(), updated) {
                replaced.push(previous);
            }
        }

        tracing::debug!(count = categories.len(), "Categories updated");
        Ok(())
    }

    async fn delete_categories(&self, ids: &[String]) -> Result<()> {
        let removed = self.data.write().await.remove_categories(ids);
        tracing::debug!(requested = ids.len(), removed, "Categories deleted");
        Ok(())
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogStore {
    async fn list_catalogs(&self) -> Result<Vec<Catalog>> {
        Ok(self.data.read().await.catalogs.values().cloned().collect())
    }

    async fn get_catalog(&self, id: &str) -> Result<Option<Catalog>> {
        Ok(self.data.read().await.catalogs.get(id).cloned())
    }

    async fn create_catalog(&self, catalog: &Catalog) -> Result<Catalog> {
        validate_catalog(catalog)?;
        let mut data = self.data.write().await;

        if data.catalogs.contains_key(&catalog.id) {
            return Err(already_exists(CATALOG, &catalog.id));
        }

        let mut created = catalog.clone();
        if created.id.is_empty() {
            created.id = new_id();
        }
        data.catalogs.insert(created.id.clone(), created.clone());

        tracing::debug!(catalog_id = %created.id, name = %created.name, "Catalog created");
        Ok(created)
    }

    async fn update_catalogs(&self, catalogs: &[Catalog]) -> Result<()> {
        let mut data = self.data.write().await;

        for catalog in catalogs {
            if !data.catalogs.contains_key(&catalog.id) {
                return Err(not_found(CATALOG, &catalog.id));
            }
            validate_catalog(catalog)?;
        }
        for catalog in catalogs {
            data.catalogs.insert(catalog.id.clone(), catalog.clone());
        }

        tracing::debug!(count = catalogs.len(), "Catalogs updated");
        Ok(())
    }

    async fn delete_catalogs(&self, ids: &[String]) -> Result<()> {
        let mut data = self.data.write().await;
        let doomed: HashSet<&String> = ids.iter().collect();

        data.catalogs.retain(|id, _| !doomed.contains(id));
        data.categories
            .retain(|_, c| !doomed.contains(&c.catalog_id));
        data.products.retain(|_, p| !doomed.contains(&p.catalog_id));
        data.properties.retain(|_, p| {
            p.catalog_id
                .as_ref()
                .is_none_or(|id| !doomed.contains(id))
        });

        tracing::debug!(requested = ids.len(), "Catalogs deleted with their contents");
        Ok(())
    }
}
