use crate::error::{MovieEngineError, Result};

/// TMDB API v3 base URL
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Image base for w500 posters
pub const TMDB_IMG_W500: &str = "https://image.tmdb.org/t/p/w500";

/// Default on-disk cache directory
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// TMDB client configuration, read from the environment
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key (`TMDB_API_KEY`, required)
    pub api_key: String,

    /// Response language (`TMDB_LANGUAGE`, default "en-US")
    pub language: String,

    /// Release region (`TMDB_REGION`, default "US"; empty disables the parameter)
    pub region: String,
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

impl TmdbConfig {
    /// Load configuration from the environment.
    ///
    /// Fails fast when `TMDB_API_KEY` is absent since nothing upstream works
    /// without it.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TMDB_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                MovieEngineError::Config("Missing TMDB_API_KEY environment variable".to_string())
            })?;

        Ok(Self {
            api_key,
            language: env_or("TMDB_LANGUAGE", "en-US"),
            region: env_or("TMDB_REGION", "US"),
        })
    }

    /// Construct a config directly (tests, embedding)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: "en-US".to_string(),
            region: "US".to_string(),
        }
    }
}

/// Cache directory from `CACHE_DIR`, falling back to `./cache`
pub fn cache_dir() -> String {
    env_or("CACHE_DIR", DEFAULT_CACHE_DIR)
}

/// Build a full poster URL from an optional TMDB poster path
pub fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", TMDB_IMG_W500, p))
}
