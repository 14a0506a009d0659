//! Request/query types (Deserialize)

use grove_core::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use serde::Deserialize;

const fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl SearchQuery {
    /// Cap limit to prevent unbounded fan-out.
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_SEARCH_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    #[serde(default)]
    pub reference: String,
}
