//! Species domain types: canonical rows, external hits, enriched candidates
//! and the search payload that reconciles the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted, authoritative species row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSpecies {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Unique key by convention.
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CanonicalSpecies {
    /// Common name, treating an empty string as absent.
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// A single result of the taxon source's species search, as returned on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalTaxonHit {
    /// Source-assigned numeric id.
    #[serde(default)]
    pub key: Option<i64>,
    #[serde(default)]
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
}

impl ExternalTaxonHit {
    /// Name to use for this hit, in source-priority order:
    /// `canonicalName`, then `scientificName`, then `species`.
    ///
    /// Blank values are skipped and the selected name is trimmed.
    #[must_use]
    pub fn usable_name(&self) -> Option<&str> {
        [&self.canonical_name, &self.scientific_name, &self.species]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .map(str::trim)
            .find(|n| !n.is_empty())
    }

    /// `"<genus>"` optionally followed by `" (<family> family)"`; `None` without a genus.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        let genus = self.genus.as_deref().filter(|g| !g.is_empty())?;
        match self.family.as_deref().filter(|f| !f.is_empty()) {
            Some(family) => Some(format!("{genus} ({family} family)")),
            None => Some(genus.to_owned()),
        }
    }
}

/// An external hit augmented with vernacular name, images and distribution.
/// Lives for one request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedCandidate {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub external_key: Option<i64>,
    pub images: Vec<String>,
    pub countries: Vec<String>,
    pub description: Option<String>,
}

/// One entry of a species search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Canonical id when the species is already stored, else the scientific name.
    pub id: String,
    pub scientific_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SearchResultItem {
    /// Reconciles an enriched candidate with its canonical row, if any.
    ///
    /// The canonical common name wins when it is non-empty; empty image and
    /// country lists become absent.
    #[must_use]
    pub fn reconcile(candidate: EnrichedCandidate, canonical: Option<&CanonicalSpecies>) -> Self {
        let id = canonical.map_or_else(|| candidate.scientific_name.clone(), |c| c.id.to_string());
        let common_name = canonical
            .and_then(CanonicalSpecies::common_name)
            .map(str::to_owned)
            .or(candidate.common_name);
        Self {
            id,
            scientific_name: candidate.scientific_name,
            common_name,
            family: candidate.family,
            genus: candidate.genus,
            images: non_empty(candidate.images),
            countries: non_empty(candidate.countries),
            description: candidate.description,
        }
    }

    /// Item built from a stored row alone, with every enrichment field absent.
    #[must_use]
    pub fn from_canonical(species: CanonicalSpecies) -> Self {
        let common_name = species.common_name().map(str::to_owned);
        Self {
            id: species.id.to_string(),
            scientific_name: species.scientific_name,
            common_name,
            family: None,
            genus: None,
            images: None,
            countries: None,
            description: None,
        }
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}
