use thiserror::Error;

/// Main error type for the movie search engine
#[derive(Error, Debug)]
pub enum MovieEngineError {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem errors (cache directory, entry files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Query exceeds the maximum accepted length
    #[error("Query too long.")]
    QueryTooLong,

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for MovieEngineError {
    fn from(s: String) -> Self {
        MovieEngineError::Other(s)
    }
}

impl From<&str> for MovieEngineError {
    fn from(s: &str) -> Self {
        MovieEngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MovieEngineError>;
