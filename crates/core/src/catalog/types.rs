use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog: the root container for categories and products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: String,
    pub name: String,
    /// Virtual catalogs only link to products owned by other catalogs.
    #[serde(default)]
    pub is_virtual: bool,
    pub default_language: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Catalog {
    /// Creates a new physical catalog with `en-US` as its default language.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_virtual: false,
            default_language: "en-US".to_string(),
            languages: vec!["en-US".to_string()],
        }
    }

    pub fn virtual_catalog(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }
}

/// A category inside a catalog. Categories form a tree through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub code: String,
    pub name: String,
    pub catalog_id: String,
    pub parent_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
    /// Property values assigned to the category. Only populated when the
    /// requested [`CategoryResponseGroup`] includes properties.
    #[serde(default)]
    pub property_values: Vec<PropertyValue>,
    /// Ancestor ids from the root down. Only populated when the requested
    /// [`CategoryResponseGroup`] includes parents.
    #[serde(default)]
    pub parents: Vec<String>,
    pub modified_date: Option<DateTime<Utc>>,
}

impl Category {
    /// Creates a new active root category.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        catalog_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            catalog_id: catalog_id.into(),
            parent_id: None,
            is_active: true,
            priority: 0,
            property_values: Vec::new(),
            parents: Vec::new(),
            modified_date: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_property_value(mut self, value: PropertyValue) -> Self {
        self.property_values.push(value);
        self
    }

    /// Returns the same category shaped for the given response group.
    pub fn shaped(mut self, group: CategoryResponseGroup) -> Self {
        if !group.includes_properties() {
            self.property_values.clear();
        }
        if !group.includes_parents() {
            self.parents.clear();
        }
        self
    }
}

/// A product (item) in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    /// SKU, unique across the store.
    pub code: String,
    pub name: String,
    pub catalog_id: String,
    pub category_id: Option<String>,
    /// Set for variations; points at the main product.
    pub main_product_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Only populated when the requested [`ItemResponseGroup`] includes
    /// properties.
    #[serde(default)]
    pub property_values: Vec<PropertyValue>,
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
}

impl CatalogProduct {
    /// Creates a new active product without a category.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        catalog_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            catalog_id: catalog_id.into(),
            category_id: None,
            main_product_id: None,
            is_active: true,
            property_values: Vec::new(),
            created_date: None,
            modified_date: None,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_main_product(mut self, main_product_id: impl Into<String>) -> Self {
        self.main_product_id = Some(main_product_id.into());
        self
    }

    pub fn with_property_value(mut self, value: PropertyValue) -> Self {
        self.property_values.push(value);
        self
    }

    /// Returns the same product shaped for the given response group.
    pub fn shaped(mut self, group: ItemResponseGroup) -> Self {
        if !group.includes_properties() {
            self.property_values.clear();
        }
        self
    }
}

/// A property value attached to a product or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValue {
    pub property_id: Option<String>,
    pub property_name: String,
    pub value: String,
    pub language_code: Option<String>,
}

impl PropertyValue {
    pub fn new(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_id: None,
            property_name: property_name.into(),
            value: value.into(),
            language_code: None,
        }
    }

    pub fn for_property(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }
}

/// The data type of a property's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValueType {
    ShortText,
    LongText,
    Number,
    Integer,
    Boolean,
    DateTime,
}

/// A property definition, owned by a catalog and optionally scoped to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub catalog_id: Option<String>,
    pub category_id: Option<String>,
    pub value_type: PropertyValueType,
    #[serde(default)]
    pub is_dictionary: bool,
    #[serde(default)]
    pub is_multivalue: bool,
    #[serde(default)]
    pub is_required: bool,
    /// Allowed values for dictionary properties.
    #[serde(default)]
    pub dictionary_values: Vec<PropertyDictionaryValue>,
}

impl Property {
    /// Creates a new short-text property for the given catalog.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        catalog_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            catalog_id: Some(catalog_id.into()),
            category_id: None,
            value_type: PropertyValueType::ShortText,
            is_dictionary: false,
            is_multivalue: false,
            is_required: false,
            dictionary_values: Vec::new(),
        }
    }

    pub fn with_value_type(mut self, value_type: PropertyValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Turns the property into a dictionary property with the given values.
    pub fn with_dictionary(mut self, values: Vec<PropertyDictionaryValue>) -> Self {
        self.is_dictionary = true;
        self.dictionary_values = values;
        self
    }
}

/// One allowed value of a dictionary property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDictionaryValue {
    pub id: String,
    pub property_id: String,
    pub alias: String,
    pub value: String,
    pub language_code: Option<String>,
}

impl PropertyDictionaryValue {
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        alias: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            property_id: property_id.into(),
            alias: alias.into(),
            value: value.into(),
            language_code: None,
        }
    }

    /// Case-insensitive match of `keyword` against alias and value.
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.alias.to_lowercase().contains(&keyword) || self.value.to_lowercase().contains(&keyword)
    }
}

/// How much of a product to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemResponseGroup {
    #[default]
    ItemInfo,
    ItemSmall,
    ItemMedium,
    ItemLarge,
    Full,
}

impl ItemResponseGroup {
    /// Stable name used in cache keys and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemResponseGroup::ItemInfo => "ItemInfo",
            ItemResponseGroup::ItemSmall => "ItemSmall",
            ItemResponseGroup::ItemMedium => "ItemMedium",
            ItemResponseGroup::ItemLarge => "ItemLarge",
            ItemResponseGroup::Full => "Full",
        }
    }

    /// Returns true if property values are loaded for this group.
    pub fn includes_properties(&self) -> bool {
        matches!(
            self,
            ItemResponseGroup::ItemMedium | ItemResponseGroup::ItemLarge | ItemResponseGroup::Full
        )
    }
}

impl fmt::Display for ItemResponseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a category to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryResponseGroup {
    #[default]
    Info,
    WithParents,
    WithProperties,
    Full,
}

impl CategoryResponseGroup {
    /// Stable name used in cache keys and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryResponseGroup::Info => "Info",
            CategoryResponseGroup::WithParents => "WithParents",
            CategoryResponseGroup::WithProperties => "WithProperties",
            CategoryResponseGroup::Full => "Full",
        }
    }

    /// Returns true if property values are loaded for this group.
    pub fn includes_properties(&self) -> bool {
        matches!(
            self,
            CategoryResponseGroup::WithProperties | CategoryResponseGroup::Full
        )
    }

    /// Returns true if the ancestor path is loaded for this group.
    pub fn includes_parents(&self) -> bool {
        matches!(
            self,
            CategoryResponseGroup::WithParents | CategoryResponseGroup::Full
        )
    }
}

impl fmt::Display for CategoryResponseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}
