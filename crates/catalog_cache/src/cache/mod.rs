//! Cache backend implementations.
//!
//! Concrete stores for the `Cache` trait defined in `catalog_cache_core::cache`.

pub mod memory;

pub use memory::MemoryCache;
