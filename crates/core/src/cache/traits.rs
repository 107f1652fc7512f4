use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Byte-oriented cache store partitioned into named regions.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from `region` by key.
    async fn get(&self, region: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in `region` with an optional TTL.
    async fn set(&self, region: &str, key: &str, value: &[u8], ttl: Option<Duration>)
        -> Result<()>;

    /// Removes every entry of `region`. Unknown or empty regions are a no-op.
    async fn clear_region(&self, region: &str) -> Result<()>;
}
