//! Per-hit enrichment: vernacular name, images and distribution.

use grove_core::{
    EnrichedCandidate, ExternalTaxonHit, MAX_COUNTRIES_PER_SPECIES, MAX_IMAGES_PER_SPECIES,
};
use grove_taxon::TaxonSource;

/// Builds an enriched candidate for one hit whose usable name is `scientific_name`.
///
/// The three lookups are independent and run concurrently. A hit without a
/// key gets no lookups and carries only its own fields.
pub async fn enrich_hit(
    source: &dyn TaxonSource,
    scientific_name: String,
    hit: ExternalTaxonHit,
) -> EnrichedCandidate {
    let (common_name, mut images, mut countries) = match hit.key {
        Some(key) => tokio::join!(
            source.vernacular_name(key),
            source.occurrence_images(key, MAX_IMAGES_PER_SPECIES),
            source.country_facet(key, MAX_COUNTRIES_PER_SPECIES),
        ),
        None => (None, Vec::new(), Vec::new()),
    };
    images.truncate(MAX_IMAGES_PER_SPECIES);
    countries.truncate(MAX_COUNTRIES_PER_SPECIES);

    let description = hit.description();
    EnrichedCandidate {
        scientific_name,
        common_name: common_name.filter(|n| !n.trim().is_empty()),
        family: hit.family,
        genus: hit.genus,
        external_key: hit.key,
        images,
        countries,
        description,
    }
}
