pub mod file;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use file::FileCache;

/// Trait for response cache implementations
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Get a cached payload by key, if present and younger than `ttl`
    async fn get(&self, key: &str, ttl: Duration) -> Result<Option<serde_json::Value>>;

    /// Save a payload under `key`, stamped with the current time
    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<()>;

    /// Remove entries older than `ttl`, returning how many were deleted
    async fn purge_expired(&self, ttl: Duration) -> Result<u64>;

    /// Get cache statistics
    async fn stats(&self) -> Result<CacheStats>;
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: u64,
    pub oldest_entry: Option<chrono::DateTime<chrono::Utc>>,
    pub newest_entry: Option<chrono::DateTime<chrono::Utc>>,
}
