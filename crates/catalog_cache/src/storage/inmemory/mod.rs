//! In-memory storage backend.
//!
//! Holds catalogs, categories, products and properties in ordered maps
//! behind one `Arc<RwLock<_>>`. Data is lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_cache::storage::inmemory::InMemoryCatalogStore;
//!
//! let store = InMemoryCatalogStore::new();
//! store.create_catalog(&Catalog::new("main", "Main")).await?;
//! ```

mod repository;

pub use repository::InMemoryCatalogStore;
