use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use grove_core::{
    EnrichedCandidate, ExternalTaxonHit, MAX_ENRICHED_CANDIDATES, MAX_EXTERNAL_CANDIDATES,
    MIN_QUERY_CHARS, SPECIES_TABLE, SearchResultItem, locale_compare, normalize_name,
};
use grove_storage::{Filter, RowQuery, RowStore};
use grove_taxon::TaxonSource;

use crate::ServiceError;
use crate::enrichment::enrich_hit;
use crate::rows::{COMMON_NAME, SCIENTIFIC_NAME, find_by_scientific_name, species_from_row};

/// Species search: external query, enrichment, dedup, reconciliation with
/// the canonical store, sort and truncate. Falls back to a store-only search
/// when the taxon source cannot be queried at all.
///
/// Never writes to the store.
pub struct SearchService {
    store: Arc<dyn RowStore>,
    taxa: Arc<dyn TaxonSource>,
}

impl SearchService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>, taxa: Arc<dyn TaxonSource>) -> Self {
        Self { store, taxa }
    }

    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResultItem>, ServiceError> {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let max_candidates = limit.saturating_mul(2).min(MAX_EXTERNAL_CANDIDATES);
        let hits = match self.taxa.search_taxa(query, max_candidates).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query, error = %e, "taxon search failed, falling back to local search");
                return self.search_database(query, limit).await;
            },
        };

        let retained = dedup_hits(hits.into_iter().take(limit.min(MAX_ENRICHED_CANDIDATES)));
        let taxa = self.taxa.as_ref();
        let candidates =
            join_all(retained.into_iter().map(|(name, hit)| enrich_hit(taxa, name, hit))).await;
        let mut items = join_all(candidates.into_iter().map(|c| self.reconcile(c))).await;

        items.sort_by(compare_results);
        items.truncate(limit);
        tracing::debug!(query, results = items.len(), "species search complete");
        Ok(items)
    }

    /// Store-only search on scientific or common name (case-insensitive
    /// substring), deduplicated by normalized scientific name, store order kept.
    pub async fn search_database(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResultItem>, ServiceError> {
        let row_query = RowQuery::new()
            .filter(Filter::any(vec![
                Filter::contains(SCIENTIFIC_NAME, query),
                Filter::contains(COMMON_NAME, query),
            ]))
            .limit(limit);
        let rows = self.store.select(SPECIES_TABLE, &row_query).await?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let species = species_from_row(row)?;
            if seen.insert(normalize_name(&species.scientific_name)) {
                items.push(SearchResultItem::from_canonical(species));
            }
        }
        Ok(items)
    }

    async fn reconcile(&self, candidate: EnrichedCandidate) -> SearchResultItem {
        let canonical =
            match find_by_scientific_name(self.store.as_ref(), &candidate.scientific_name).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(
                        scientific_name = %candidate.scientific_name,
                        error = %e,
                        "canonical lookup failed, returning external data only"
                    );
                    None
                },
            };
        SearchResultItem::reconcile(candidate, canonical.as_ref())
    }
}

/// Drops nameless hits and later duplicates of a normalized name, keeping
/// each survivor paired with its name.
fn dedup_hits(
    hits: impl IntoIterator<Item = ExternalTaxonHit>,
) -> Vec<(String, ExternalTaxonHit)> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter_map(|hit| {
            let name = hit.usable_name()?.to_owned();
            seen.insert(normalize_name(&name)).then_some((name, hit))
        })
        .collect()
}

/// Result order: items with a common name first, by common name; the rest
/// by scientific name.
#[must_use]
pub fn compare_results(a: &SearchResultItem, b: &SearchResultItem) -> Ordering {
    match (a.common_name.as_deref(), b.common_name.as_deref()) {
        (Some(x), Some(y)) => locale_compare(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => locale_compare(&a.scientific_name, &b.scientific_name),
    }
}

#[cfg(test)]
#[path = "search_service_tests.rs"]
mod tests;
