use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, ResponseCache};
use crate::error::Result;

/// File-based response cache.
///
/// One JSON file per key under the cache directory, named by the blake3 hash
/// of the key. Each file holds a time-stamped envelope; an entry older than
/// the caller's TTL is treated as a miss. Corrupt or unreadable entries are
/// misses too, never errors.
pub struct FileCache {
    dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    cached_at: DateTime<Utc>,
    payload: serde_json::Value,
}

fn is_expired(cached_at: DateTime<Utc>, ttl: Duration) -> bool {
    let age = Utc::now().signed_duration_since(cached_at);
    age.num_seconds() < 0 || age.num_seconds() as u64 > ttl.as_secs()
}

impl FileCache {
    /// Create a new file cache rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = blake3::hash(key.as_bytes());
        self.dir.join(format!("{}.json", digest.to_hex()))
    }

    async fn read_envelope(path: &Path) -> Option<Envelope> {
        let raw = tokio::fs::read(path).await.ok()?;
        serde_json::from_slice(&raw).ok()
    }
}

#[async_trait]
impl ResponseCache for FileCache {
    async fn get(&self, key: &str, ttl: Duration) -> Result<Option<serde_json::Value>> {
        let path = self.entry_path(key);
        match Self::read_envelope(&path).await {
            Some(envelope) if !is_expired(envelope.cached_at, ttl) => Ok(Some(envelope.payload)),
            _ => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let envelope = Envelope {
            cached_at: Utc::now(),
            payload: value.clone(),
        };
        let raw = serde_json::to_vec(&envelope)?;
        tokio::fs::write(self.entry_path(key), raw).await?;
        Ok(())
    }

    async fn purge_expired(&self, ttl: Duration) -> Result<u64> {
        let mut deleted = 0u64;
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(_) => return Ok(0),
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            // Corrupt entries count as expired
            let stale = match Self::read_envelope(&path).await {
                Some(envelope) => is_expired(envelope.cached_at, ttl),
                None => true,
            };

            if stale && tokio::fs::remove_file(&path).await.is_ok() {
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut total_entries = 0u64;
        let mut oldest_entry: Option<DateTime<Utc>> = None;
        let mut newest_entry: Option<DateTime<Utc>> = None;

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(_) => {
                return Ok(CacheStats {
                    total_entries: 0,
                    oldest_entry: None,
                    newest_entry: None,
                })
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(envelope) = Self::read_envelope(&path).await else {
                continue;
            };

            total_entries += 1;
            if oldest_entry.map_or(true, |t| envelope.cached_at < t) {
                oldest_entry = Some(envelope.cached_at);
            }
            if newest_entry.map_or(true, |t| envelope.cached_at > t) {
                newest_entry = Some(envelope.cached_at);
            }
        }

        Ok(CacheStats {
            total_entries,
            oldest_entry,
            newest_entry,
        })
    }
}
