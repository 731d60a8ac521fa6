use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use moviedb_search_engine::providers::MovieProvider;
use moviedb_search_engine::{ranking, FileCache, Movie, Result, SearchEngine, SearchPage};

struct FixtureProvider {
    calls: AtomicUsize,
    results: Vec<Movie>,
}

impl FixtureProvider {
    fn new(results: Vec<Movie>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            results,
        }
    }
}

#[async_trait]
impl MovieProvider for FixtureProvider {
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
        "fixture"
    }
}

fn movie(id: u64, title: &str, rating: f64) -> Movie {
    let mut m = Movie::new(id, title);
    m.vote_average = Some(rating);
    m
}

#[tokio::test]
async fn search_then_rank_end_to_end() {
    // Provider returns the exact match second; ranking must put it first
    let provider = Arc::new(FixtureProvider::new(vec![
        movie(2, "Inceptions 2", 5.0),
        movie(1, "Inception", 8.8),
    ]));
    let engine = SearchEngine::new(provider);

    let page = engine.search("inception", 1).await.unwrap();
    assert_eq!(page.results.len(), 2);

    let ranked = ranking::rank(&page.query, &page.results);
    let ids: Vec<u64> = ranked.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn repeat_search_is_served_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(FixtureProvider::new(vec![movie(603, "The Matrix", 8.2)]));
    let engine = SearchEngine::new(provider.clone())
        .with_cache(Arc::new(FileCache::new(dir.path())));

    let first = engine.search("matrix", 1).await.unwrap();
    let second = engine.search("matrix", 1).await.unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.results, second.results);
}

#[tokio::test]
async fn cache_stats_and_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(FixtureProvider::new(vec![movie(1, "Alien", 8.1)]));
    let engine = SearchEngine::new(provider)
        .with_cache(Arc::new(FileCache::new(dir.path())));

    let stats = engine.cache_stats().await.unwrap();
    assert_eq!(stats.total_entries, 0);

    engine.search("alien", 1).await.unwrap();

    let stats = engine.cache_stats().await.unwrap();
    assert_eq!(stats.total_entries, 1);

    // Nothing is old enough to purge under a generous TTL
    let deleted = engine.cleanup_cache(Duration::from_secs(3600)).await.unwrap();
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn malformed_candidates_rank_and_render_safely() {
    let sparse: Vec<Movie> = serde_json::from_str(
        r#"[
            {"id": "not-a-number", "title": ""},
            {"id": 27205, "title": "Inception", "release_date": "2010-07-15", "vote_average": 8.8},
            {"title": "Inception: The Cobol Job", "release_date": ""}
        ]"#,
    )
    .unwrap();

    let ranked = ranking::rank("inception", &sparse);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].id, 27205);
    assert_eq!(ranked[0].year(), Some("2010"));

    // Blank title renders its fallback, never panics
    let blank = ranked.iter().find(|m| m.title.is_empty()).unwrap();
    assert_eq!(blank.display_title(), "Untitled");
    assert_eq!(blank.year(), None);
    assert_eq!(blank.poster_url(), None);
}
