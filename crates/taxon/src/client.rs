use std::collections::HashSet;

use async_trait::async_trait;
use grove_core::ExternalTaxonHit;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::gbif_types::{OccurrenceSearchResponse, SpeciesSearchResponse, VernacularNamesResponse};
use crate::{TaxonClientConfig, TaxonError, TaxonSource};

const STILL_IMAGE: &str = "StillImage";

/// Client for the GBIF v1 REST API.
#[derive(Debug, Clone)]
pub struct GbifClient {
    client: reqwest::Client,
    base_url: String,
}

impl GbifClient {
    /// Builds a client with its own HTTP connection pool.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: &TaxonClientConfig) -> Result<Self, TaxonError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TaxonError::ClientInit(e.to_string()))?;
        Ok(Self::with_http_client(client, &config.base_url))
    }

    /// Uses a caller-supplied HTTP client.
    #[must_use]
    pub fn with_http_client(client: reqwest::Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TaxonError> {
        let response =
            self.client.get(format!("{}{path}", self.base_url)).query(query).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TaxonError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, 200).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| TaxonError::JsonParse {
            context: format!("{path} (body: {})", truncate(&body, 200)),
            source: e,
        })
    }

    async fn species_exists(&self, key: i64) -> Result<(), TaxonError> {
        self.get_json::<IgnoredAny>(&format!("/species/{key}"), &[]).await.map(|_| ())
    }
}

#[async_trait]
impl TaxonSource for GbifClient {
    async fn search_taxa(
        &self,
        query: &str,
        max_candidates: usize,
    ) -> Result<Vec<ExternalTaxonHit>, TaxonError> {
        let params = [
            ("q", query.to_owned()),
            ("limit", max_candidates.to_string()),
            ("status", "ACCEPTED".to_owned()),
            ("rank", "SPECIES".to_owned()),
            ("kingdom", "Plantae".to_owned()),
        ];
        let response: SpeciesSearchResponse = self.get_json("/species/search", &params).await?;
        tracing::debug!(query, hits = response.results.len(), "taxon search");
        Ok(response.results)
    }

    async fn vernacular_name(&self, key: i64) -> Option<String> {
        let response: VernacularNamesResponse =
            match self.get_json(&format!("/species/{key}/vernacularNames"), &[]).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(key, error = %e, "vernacular name lookup failed");
                    return None;
                },
            };
        let names: Vec<_> = response
            .results
            .into_iter()
            .filter(|v| v.vernacular_name.as_deref().is_some_and(|n| !n.trim().is_empty()))
            .collect();
        let chosen = names.iter().position(|v| v.is_english()).unwrap_or(0);
        names.into_iter().nth(chosen).and_then(|v| v.vernacular_name)
    }

    async fn occurrence_images(&self, key: i64, cap: usize) -> Vec<String> {
        if cap == 0 {
            return Vec::new();
        }
        let params = [
            ("speciesKey", key.to_string()),
            ("mediaType", STILL_IMAGE.to_owned()),
            ("limit", cap.to_string()),
        ];
        let response: OccurrenceSearchResponse =
            match self.get_json("/occurrence/search", &params).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(key, error = %e, "occurrence image lookup failed");
                    return Vec::new();
                },
            };

        let mut seen = HashSet::new();
        let mut images = Vec::with_capacity(cap);
        let media = response.results.into_iter().flat_map(|o| o.media.unwrap_or_default());
        for item in media {
            if item.media_type.as_deref() != Some(STILL_IMAGE) {
                continue;
            }
            let Some(url) = item.identifier.filter(|u| !u.is_empty()) else {
                continue;
            };
            if seen.insert(url.clone()) {
                images.push(url);
                if images.len() >= cap {
                    break;
                }
            }
        }
        images
    }

    async fn country_facet(&self, key: i64, cap: usize) -> Vec<String> {
        if let Err(e) = self.species_exists(key).await {
            tracing::debug!(key, error = %e, "species detail lookup failed");
            return Vec::new();
        }
        let params = [
            ("speciesKey", key.to_string()),
            ("limit", "0".to_owned()),
            ("facet", "country".to_owned()),
        ];
        let response: OccurrenceSearchResponse =
            match self.get_json("/occurrence/search", &params).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(key, error = %e, "country facet lookup failed");
                    return Vec::new();
                },
            };
        response
            .facets
            .into_iter()
            .next()
            .map(|f| f.counts.into_iter().map(|c| c.name).take(cap).collect())
            .unwrap_or_default()
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
