use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{TmdbConfig, TMDB_BASE_URL};
use crate::core::{Movie, SearchPage};
use crate::error::{MovieEngineError, Result};
use crate::providers::MovieProvider;

/// TMDB API provider
pub struct TmdbProvider {
    client: Client,
    config: TmdbConfig,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<Movie>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize, Default)]
struct TmdbErrorBody {
    #[serde(default)]
    status_message: Option<String>,
}

impl TmdbProvider {
    /// Create a new TMDB provider
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("moviedb-search-engine/0.1")
            .build()?;

        Ok(Self {
            client,
            config,
            base_url: TMDB_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different base URL (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn provider_err(message: impl Into<String>) -> MovieEngineError {
        MovieEngineError::Provider {
            provider: "tmdb".to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl MovieProvider for TmdbProvider {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage> {
        let url = format!("{}/search/movie", self.base_url);

        let mut params = vec![
            ("api_key", self.config.api_key.as_str()),
            ("language", self.config.language.as_str()),
            ("query", query),
            ("include_adult", "false"),
        ];
        if !self.config.region.is_empty() {
            params.push(("region", self.config.region.as_str()));
        }
        let page_param = page.to_string();
        params.push(("page", page_param.as_str()));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Self::provider_err(format!("Search request failed: {}", e)))?;

        let status = response.status();
        let raw = response
            .bytes()
            .await
            .map_err(|e| Self::provider_err(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let body: TmdbErrorBody = serde_json::from_slice(&raw).unwrap_or_default();
            let message = body
                .status_message
                .unwrap_or_else(|| "Unknown TMDB error".to_string());
            return Err(Self::provider_err(format!("HTTP {}: {}", status, message)));
        }

        let data: TmdbSearchResponse = serde_json::from_slice(&raw)
            .map_err(|e| Self::provider_err(format!("Invalid JSON: {}", e)))?;

        tracing::debug!(
            query,
            page,
            results = data.results.len(),
            "tmdb search returned"
        );

        Ok(SearchPage {
            query: query.to_string(),
            page,
            results: data.results,
            total_pages: data.total_pages,
            total_results: data.total_results,
        })
    }

    fn name(&self) -> &str {
        "tmdb"
    }
}
