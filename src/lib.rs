//! # MovieDB Search Engine
//!
//! Movie search engine built on the TMDB API:
//! - TMDB provider with guardrailed search proxy
//! - File-based TTL response cache
//! - Fuzzy re-ranking of candidate pages (normalization, edit distance,
//!   weighted composite scoring)
//! - Debounced, cancellation-safe query dispatcher with stale-response
//!   suppression
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use moviedb_search_engine::{
//!     ranking, SearchEngine, TmdbConfig, TmdbProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = TmdbConfig::from_env()?;
//!     let provider = Arc::new(TmdbProvider::new(config)?);
//!     let engine = SearchEngine::new(provider);
//!
//!     let page = engine.search("inception", 1).await?;
//!     let ranked = ranking::rank("inception", &page.results);
//!
//!     for movie in ranked {
//!         println!("{}", movie.display_title());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod providers;
pub mod ranking;

// Re-export primary types
pub use cache::{FileCache, ResponseCache};
pub use config::TmdbConfig;
pub use core::{Movie, SearchPage};
pub use dispatcher::{HttpTransport, SearchController, SearchTransport, SearchView};
pub use engine::SearchEngine;
pub use error::{MovieEngineError, Result};
pub use providers::TmdbProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
