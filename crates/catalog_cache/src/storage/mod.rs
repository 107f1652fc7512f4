//! Storage backends and the caching decorator.
//!
//! - [`inmemory`]: reference implementation of the catalog services
//! - [`cached`]: read-through decorator over any set of catalog services

pub mod cached;
pub mod inmemory;

pub use cached::CatalogServicesDecorator;
pub use inmemory::InMemoryCatalogStore;
