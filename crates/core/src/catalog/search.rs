use serde::{Deserialize, Serialize};

use super::types::{CatalogProduct, Category, ItemResponseGroup};

/// Default page size for catalog searches.
pub const DEFAULT_TAKE: usize = 20;

/// Which result sets a catalog search should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchResponseGroup {
    WithProducts,
    WithCategories,
    #[default]
    Full,
}

impl SearchResponseGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchResponseGroup::WithProducts => "WithProducts",
            SearchResponseGroup::WithCategories => "WithCategories",
            SearchResponseGroup::Full => "Full",
        }
    }

    pub fn includes_products(&self) -> bool {
        matches!(
            self,
            SearchResponseGroup::WithProducts | SearchResponseGroup::Full
        )
    }

    pub fn includes_categories(&self) -> bool {
        matches!(
            self,
            SearchResponseGroup::WithCategories | SearchResponseGroup::Full
        )
    }
}

/// Criteria for a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    pub catalog_id: Option<String>,
    pub category_id: Option<String>,
    /// Also match products and categories nested below `category_id`.
    pub search_in_children: bool,
    pub response_group: SearchResponseGroup,
    pub item_response_group: ItemResponseGroup,
    /// Restrict products to these codes.
    pub codes: Vec<String>,
    pub skip: usize,
    pub take: usize,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            keyword: None,
            catalog_id: None,
            category_id: None,
            search_in_children: false,
            response_group: SearchResponseGroup::default(),
            item_response_group: ItemResponseGroup::default(),
            codes: Vec::new(),
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

impl SearchCriteria {
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn in_catalog(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn in_category(mut self, category_id: impl Into<String>, children: bool) -> Self {
        self.category_id = Some(category_id.into());
        self.search_in_children = children;
        self
    }

    pub fn with_response_group(mut self, group: SearchResponseGroup) -> Self {
        self.response_group = group;
        self
    }

    pub fn with_codes(mut self, codes: Vec<String>) -> Self {
        self.codes = codes;
        self
    }

    pub fn page(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }

    /// Renders every criterion, in declaration order, into a stable string.
    ///
    /// Two criteria that compare equal always render the same key. Values are
    /// not escaped, so a `;` or `,` inside a keyword or code can make two
    /// different criteria render the same key, as with the cache key separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_cache_core::catalog::SearchCriteria;
    ///
    /// let key = SearchCriteria::default().with_keyword("phone").cache_key();
    /// assert_eq!(
    ///     key,
    ///     "keyword=phone;catalog=;category=;children=false;group=Full;items=ItemInfo;codes=;skip=0;take=20"
    /// );
    /// ```
    pub fn cache_key(&self) -> String {
        format!(
            "keyword={};catalog={};category={};children={};group={};items={};codes={};skip={};take={}",
            self.keyword.as_deref().unwrap_or_default(),
            self.catalog_id.as_deref().unwrap_or_default(),
            self.category_id.as_deref().unwrap_or_default(),
            self.search_in_children,
            self.response_group.as_str(),
            self.item_response_group.as_str(),
            self.codes.join(","),
            self.skip,
            self.take,
        )
    }
}

/// The envelope returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Total number of matching products before paging.
    pub product_total_count: usize,
    pub products: Vec<CatalogProduct>,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_criteria_render_equal_keys() {
        let a = SearchCriteria::default()
            .with_keyword("phone")
            .in_catalog("electronics");
        let b = SearchCriteria::default()
            .with_keyword("phone")
            .in_catalog("electronics");

        assert_eq!(a, b);
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_each_criterion_changes_key() {
        let base = SearchCriteria::default();
        let variants = [
            base.clone().with_keyword("x"),
            base.clone().in_catalog("c"),
            base.clone().in_category("cat", false),
            base.clone().in_category("cat", true),
            base.clone().with_response_group(SearchResponseGroup::WithProducts),
            base.clone().with_codes(vec!["A".to_string()]),
            base.clone().page(20, 20),
        ];

        for variant in &variants {
            assert_ne!(variant.cache_key(), base.cache_key(), "{variant:?}");
        }
    }

    #[test]
    fn test_separators_inside_codes_are_not_escaped() {
        let joined = SearchCriteria::default().with_codes(vec!["a,b".to_string()]);
        let split = SearchCriteria::default().with_codes(vec!["a".to_string(), "b".to_string()]);

        assert_ne!(joined, split);
        assert_eq!(joined.cache_key(), split.cache_key());
    }

    #[test]
    fn test_criteria_deserialize_with_defaults() {
        let criteria: SearchCriteria = serde_json::from_str(r#"{"keyword":"tv"}"#).unwrap();

        assert_eq!(criteria.keyword.as_deref(), Some("tv"));
        assert_eq!(criteria.take, DEFAULT_TAKE);
        assert_eq!(criteria.response_group, SearchResponseGroup::Full);
    }

    #[test]
    fn test_response_group_flags() {
        assert!(SearchResponseGroup::Full.includes_products());
        assert!(SearchResponseGroup::Full.includes_categories());
        assert!(!SearchResponseGroup::WithProducts.includes_categories());
        assert!(!SearchResponseGroup::WithCategories.includes_products());
    }
}
