use async_trait::async_trait;
use grove_core::ExternalTaxonHit;

use crate::TaxonError;

/// Remote taxonomic registry.
///
/// Injected into the search pipeline so tests can substitute a fake.
#[async_trait]
pub trait TaxonSource: Send + Sync {
    /// Accepted, species-rank plant taxa matching `query`, in source order.
    ///
    /// Fails on transport error, non-success status or malformed payload.
    async fn search_taxa(
        &self,
        query: &str,
        max_candidates: usize,
    ) -> Result<Vec<ExternalTaxonHit>, TaxonError>;

    /// English vernacular name if one exists, else the first listed, else `None`.
    async fn vernacular_name(&self, key: i64) -> Option<String>;

    /// Up to `cap` distinct still-image URLs from occurrence records.
    async fn occurrence_images(&self, key: i64, cap: usize) -> Vec<String>;

    /// Up to `cap` country labels ordered by descending occurrence count.
    async fn country_facet(&self, key: i64, cap: usize) -> Vec<String>;
}
