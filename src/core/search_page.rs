use serde::{Deserialize, Serialize};

use crate::core::Movie;

fn default_page() -> u32 {
    1
}

/// One page of search results, as served by the search proxy.
///
/// Also the shape a provider hands back, with `query` filled in by the engine.
/// Every field defaults so a sparse or partially malformed body still parses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    /// The query this page answers (echoed for diagnostics only)
    #[serde(default)]
    pub query: String,

    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,

    /// Candidates in the provider's own relevance order
    #[serde(default)]
    pub results: Vec<Movie>,

    /// Total pages available upstream
    #[serde(default)]
    pub total_pages: u32,

    /// Total matching results upstream
    #[serde(default)]
    pub total_results: u64,
}

impl SearchPage {
    /// Empty page for sub-threshold queries: no results, zero totals
    pub fn empty(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::empty("", 1)
    }
}
