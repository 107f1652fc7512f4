use thiserror::Error;

/// Errors raised when validating catalog entities before they are stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),
    #[error("{entity} name too long (max {max} characters)")]
    NameTooLong { entity: &'static str, max: usize },
    #[error("{0} code cannot be empty")]
    EmptyCode(&'static str),
    #[error("{0} must belong to a catalog")]
    MissingCatalogId(&'static str),
    #[error("Category cannot be its own parent: {0}")]
    SelfParent(String),
    #[error("Product cannot be its own main product: {0}")]
    SelfVariation(String),
    #[error("Default language {0} is not one of the catalog languages")]
    UnknownDefaultLanguage(String),
    #[error("Dictionary value belongs to another property: {0}")]
    ForeignDictionaryValue(String),
}
