use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStats, ResponseCache};
use crate::core::SearchPage;
use crate::error::{MovieEngineError, Result};
use crate::providers::MovieProvider;
use crate::ranking::text::normalize;

/// Minimum trimmed query length before the provider is contacted
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum accepted query length
pub const MAX_QUERY_LEN: usize = 80;

/// Typeahead pages stay small
const MAX_PAGE: u32 = 5;

/// Short TTL for search responses; typeahead queries churn quickly
const SEARCH_CACHE_TTL: Duration = Duration::from_secs(60);

/// Main search orchestrator: guardrails, response cache, provider
pub struct SearchEngine {
    provider: Arc<dyn MovieProvider>,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl SearchEngine {
    /// Create a new engine over a provider, without caching
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            cache: None,
        }
    }

    /// Attach a response cache
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    fn cache_key(query: &str, page: u32) -> String {
        format!("search/movie:{}:{}", page, normalize(query))
    }

    /// Search for movies.
    ///
    /// Sub-threshold queries resolve to an empty page without contacting the
    /// provider; over-long queries are rejected. Pages are clamped to
    /// `[1, 5]`. Successful provider responses are cached for a short TTL;
    /// cache write failures are logged and ignored.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchPage> {
        let query = query.trim();
        let page = page.clamp(1, MAX_PAGE);

        let len = query.chars().count();
        if len < MIN_QUERY_LEN {
            return Ok(SearchPage::empty(query, page));
        }
        if len > MAX_QUERY_LEN {
            return Err(MovieEngineError::QueryTooLong);
        }

        let key = Self::cache_key(query, page);

        if let Some(cache) = &self.cache {
            if let Ok(Some(value)) = cache.get(&key, SEARCH_CACHE_TTL).await {
                if let Ok(mut cached) = serde_json::from_value::<SearchPage>(value) {
                    tracing::debug!(query, page, "search cache hit");
                    cached.query = query.to_string();
                    return Ok(cached);
                }
            }
        }

        let mut result = self.provider.search(query, page).await?;
        result.query = query.to_string();

        if let Some(cache) = &self.cache {
            match serde_json::to_value(&result) {
                Ok(value) => {
                    if let Err(e) = cache.put(&key, &value).await {
                        tracing::warn!("Failed to save search response to cache: {}", e);
                    }
                }
                Err(e) => tracing::warn!("Failed to serialize search response: {}", e),
            }
        }

        Ok(result)
    }

    /// Get cache statistics (empty stats when no cache is attached)
    pub async fn cache_stats(&self) -> Result<CacheStats> {
        match &self.cache {
            Some(cache) => cache.stats().await,
            None => Ok(CacheStats {
                total_entries: 0,
                oldest_entry: None,
                newest_entry: None,
            }),
        }
    }

    /// Remove cache entries older than `max_age`
    pub async fn cleanup_cache(&self, max_age: Duration) -> Result<u64> {
        match &self.cache {
            Some(cache) => cache.purge_expired(max_age).await,
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Movie;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        calls: AtomicUsize,
        results: Vec<Movie>,
    }

    impl MockProvider {
        fn new(results: Vec<Movie>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                results,
            }
        }
    }

    #[async_trait]
    impl MovieProvider for MockProvider {
        async fn search(&self, query: &str, page: u32) -> Result<SearchPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SearchPage {
                query: query.to_string(),
                page,
                results: self.results.clone(),
                total_pages: 1,
                total_results: self.results.len() as u64,
            })
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_short_query_skips_provider() {
        let provider = Arc::new(MockProvider::new(vec![Movie::new(1, "Heat")]));
        let engine = SearchEngine::new(provider.clone());

        let page = engine.search("b", 1).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let page = engine.search("   ", 1).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_long_query_rejected() {
        let provider = Arc::new(MockProvider::new(vec![]));
        let engine = SearchEngine::new(provider.clone());

        let long = "a".repeat(81);
        let err = engine.search(&long, 1).await.unwrap_err();
        assert!(matches!(err, MovieEngineError::QueryTooLong));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        // Exactly 80 characters is still accepted
        let ok = "a".repeat(80);
        assert!(engine.search(&ok, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_page_clamped() {
        let provider = Arc::new(MockProvider::new(vec![]));
        let engine = SearchEngine::new(provider);

        let page = engine.search("heat", 99).await.unwrap();
        assert_eq!(page.page, 5);

        let page = engine.search("heat", 0).await.unwrap();
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_provider() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::new(vec![Movie::new(1, "Heat")]));
        let engine = SearchEngine::new(provider.clone())
            .with_cache(Arc::new(crate::cache::FileCache::new(dir.path())));

        let first = engine.search("heat", 1).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let second = engine.search("Heat", 1).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.results, second.results);
        // Echoed query follows the live request, not the cached one
        assert_eq!(second.query, "Heat");
    }
}
