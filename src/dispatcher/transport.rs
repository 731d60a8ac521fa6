use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::core::SearchPage;
use crate::error::Result;

/// Errors a search transport can produce.
///
/// Aborts are a separate variant from failures: a cancelled request must be
/// droppable without ever surfacing as a user-visible error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request was intentionally cancelled
    Aborted,

    /// The request could not complete (unreachable, timeout, connection reset)
    Network(String),

    /// The proxy answered with a non-success status, optionally carrying an
    /// error message from its body
    Upstream { message: Option<String> },
}

/// Transport abstraction between the dispatcher and the search proxy
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch one page of candidates for `query`
    async fn fetch(&self, query: &str) -> std::result::Result<SearchPage, TransportError>;
}

/// HTTP transport against the search proxy endpoint (`GET <endpoint>?q=`)
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpTransport {
    /// Create a transport for a proxy endpoint such as
    /// `http://localhost:8080/api/search`
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn fetch(&self, query: &str) -> std::result::Result<SearchPage, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let raw = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            // Error bodies that fail to parse degrade to a message-less error
            let body: ErrorBody = serde_json::from_slice(&raw).unwrap_or_default();
            return Err(TransportError::Upstream {
                message: body.error,
            });
        }

        // A success body that fails to parse is treated as an empty page
        Ok(serde_json::from_slice(&raw).unwrap_or_default())
    }
}
