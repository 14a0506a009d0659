use anyhow::Result;
use grove_service::{SearchService, SpeciesService};

use crate::{open_store, print_json, taxon_client};

async fn species_service() -> Result<SpeciesService> {
    Ok(SpeciesService::new(open_store().await?))
}

pub(crate) async fn run_search(query: &str, limit: usize) -> Result<()> {
    let search = SearchService::new(open_store().await?, taxon_client()?);
    print_json(&search.search(query, limit).await?)
}

pub(crate) async fn run_resolve(scientific_name: &str, common_name: Option<&str>) -> Result<()> {
    let species = species_service().await?;
    print_json(&species.resolve_or_create(scientific_name, common_name).await?)
}

pub(crate) async fn run_get(id: &str) -> Result<()> {
    let species = species_service().await?;
    print_json(&species.find_one(id).await?)
}

pub(crate) async fn run_list() -> Result<()> {
    let species = species_service().await?;
    print_json(&species.find_all().await?)
}

pub(crate) async fn run_link(reference: &str) -> Result<()> {
    let species = species_service().await?;
    print_json(&species.resolve_reference(reference).await?)
}
