use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Cache TTL in seconds, 0 keeps entries until evicted or cleared (default: 0)
    pub cache_ttl_seconds: u64,
    /// Load the demo catalog at startup (default: true)
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 0)
    /// - `SEED_DEMO_DATA` - Seed the demo catalog (default: true)
    pub fn from_env() -> Self {
        Self {
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Get cache TTL as a Duration, `None` when entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_max_entries: 10_000,
            cache_ttl_seconds: 0,
            seed_demo_data: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
