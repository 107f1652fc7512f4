use std::collections::HashSet;

use super::error::ValidationError;
use super::search::SearchCriteria;
use super::types::{Catalog, CatalogProduct, Category, Property};

const MAX_NAME_LEN: usize = 255;
const MAX_CODE_LEN: usize = 64;

fn validate_name(entity: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName(entity));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            entity,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

fn validate_code(entity: &'static str, code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::EmptyCode(entity));
    }
    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::NameTooLong {
            entity,
            max: MAX_CODE_LEN,
        });
    }
    Ok(())
}

/// Validates a catalog before creation or update.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    validate_name("Catalog", &catalog.name)?;
    if !catalog.languages.is_empty() && !catalog.languages.contains(&catalog.default_language) {
        return Err(ValidationError::UnknownDefaultLanguage(
            catalog.default_language.clone(),
        ));
    }
    Ok(())
}

/// Validates a category before creation or update.
pub fn validate_category(category: &Category) -> Result<(), ValidationError> {
    validate_name("Category", &category.name)?;
    validate_code("Category", &category.code)?;
    if category.catalog_id.trim().is_empty() {
        return Err(ValidationError::MissingCatalogId("Category"));
    }
    if category.parent_id.as_deref() == Some(category.id.as_str()) && !category.id.is_empty() {
        return Err(ValidationError::SelfParent(category.id.clone()));
    }
    Ok(())
}

/// Validates a product before creation or update.
pub fn validate_product(product: &CatalogProduct) -> Result<(), ValidationError> {
    validate_name("Product", &product.name)?;
    validate_code("Product", &product.code)?;
    if product.catalog_id.trim().is_empty() {
        return Err(ValidationError::MissingCatalogId("Product"));
    }
    if product.main_product_id.as_deref() == Some(product.id.as_str()) && !product.id.is_empty() {
        return Err(ValidationError::SelfVariation(product.id.clone()));
    }
    Ok(())
}

/// Validates a property before creation or update.
pub fn validate_property(property: &Property) -> Result<(), ValidationError> {
    validate_name("Property", &property.name)?;
    if let Some(foreign) = property
        .dictionary_values
        .iter()
        .find(|value| {
            !property.id.is_empty()
                && !value.property_id.is_empty()
                && value.property_id != property.id
        })
    {
        return Err(ValidationError::ForeignDictionaryValue(foreign.id.clone()));
    }
    Ok(())
}

/// Returns `root` plus the ids of every category below it.
pub fn descendant_category_ids(categories: &[Category], root: &str) -> HashSet<String> {
    let mut found = HashSet::from([root.to_string()]);
    let mut frontier = vec![root.to_string()];

    while let Some(parent) = frontier.pop() {
        for child in categories
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(parent.as_str()))
        {
            if found.insert(child.id.clone()) {
                frontier.push(child.id.clone());
            }
        }
    }

    found
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns true if the product satisfies every filter in `criteria`.
///
/// `category_scope` is the set of category ids the search covers, already
/// expanded for `search_in_children`.
pub fn product_matches(
    product: &CatalogProduct,
    criteria: &SearchCriteria,
    category_scope: Option<&HashSet<String>>,
) -> bool {
    let keyword_ok = criteria.keyword.as_deref().is_none_or(|keyword| {
        contains_ignore_case(&product.name, keyword) || contains_ignore_case(&product.code, keyword)
    });
    let catalog_ok = criteria
        .catalog_id
        .as_deref()
        .is_none_or(|id| product.catalog_id == id);
    let category_ok = category_scope.is_none_or(|scope| {
        product
            .category_id
            .as_ref()
            .is_some_and(|id| scope.contains(id))
    });
    let code_ok = criteria.codes.is_empty() || criteria.codes.contains(&product.code);

    keyword_ok && catalog_ok && category_ok && code_ok
}

/// Returns true if the category satisfies the keyword, catalog and scope filters.
pub fn category_matches(
    category: &Category,
    criteria: &SearchCriteria,
    category_scope: Option<&HashSet<String>>,
) -> bool {
    let keyword_ok = criteria.keyword.as_deref().is_none_or(|keyword| {
        contains_ignore_case(&category.name, keyword)
            || contains_ignore_case(&category.code, keyword)
    });
    let catalog_ok = criteria
        .catalog_id
        .as_deref()
        .is_none_or(|id| category.catalog_id == id);
    // The scope root itself is not a result; only what sits below it.
    let scope_ok = match (category_scope, criteria.category_id.as_deref()) {
        (Some(scope), Some(root)) => category.id != root && scope.contains(&category.id),
        _ => true,
    };

    keyword_ok && catalog_ok && scope_ok
}

/// Applies `skip` and `take` to an already filtered list.
pub fn paginate<T>(items: Vec<T>, skip: usize, take: usize) -> Vec<T> {
    items.into_iter().skip(skip).take(take).collect()
}
