pub mod tmdb;

use async_trait::async_trait;

use crate::core::SearchPage;
use crate::error::Result;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by query string, returning one provider-ranked page
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
