//! Wire types for the GBIF v1 API (Deserialize only).

use grove_core::ExternalTaxonHit;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SpeciesSearchResponse {
    #[serde(default)]
    pub results: Vec<ExternalTaxonHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VernacularNamesResponse {
    #[serde(default)]
    pub results: Vec<VernacularName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VernacularName {
    #[serde(default)]
    pub vernacular_name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl VernacularName {
    pub fn is_english(&self) -> bool {
        matches!(self.language.as_deref(), Some("eng" | "en"))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OccurrenceSearchResponse {
    #[serde(default)]
    pub results: Vec<Occurrence>,
    #[serde(default)]
    pub facets: Vec<Facet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Occurrence {
    #[serde(default)]
    pub media: Option<Vec<Media>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Media {
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Facet {
    #[serde(default)]
    pub counts: Vec<FacetCount>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FacetCount {
    pub name: String,
}
