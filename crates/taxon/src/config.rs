use std::time::Duration;

use grove_core::{DEFAULT_TAXON_TIMEOUT_SECS, DEFAULT_TAXON_URL, env_parse_with_default};

/// Connection settings for [`crate::GbifClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TaxonClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAXON_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TAXON_TIMEOUT_SECS),
            user_agent: concat!("grove/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TaxonClientConfig {
    /// Reads `GROVE_TAXON_URL` and `GROVE_TAXON_TIMEOUT_SECS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("GROVE_TAXON_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout_secs = env_parse_with_default("GROVE_TAXON_TIMEOUT_SECS", DEFAULT_TAXON_TIMEOUT_SECS);
        Self { base_url, timeout: Duration::from_secs(timeout_secs), ..defaults }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
