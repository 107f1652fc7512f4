//! Functional core for the catalog cache.
//!
//! - [`catalog`]: domain types and pure validation
//! - [`services`]: the service traits the caching decorator wraps
//! - [`cache`]: key construction, the cache store trait and the
//!   get-or-compute adapter

pub mod cache;
pub mod catalog;
pub mod services;
