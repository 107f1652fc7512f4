//! In-memory cache backend implementation.
//!
//! Provides a thread-safe, region-aware LRU cache with TTL support for
//! single-instance deployments.

mod cache;

pub use cache::MemoryCache;
