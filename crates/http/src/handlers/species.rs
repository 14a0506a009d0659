use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use grove_core::{CanonicalSpecies, SearchResultItem};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{LinkRequest, ResolveRequest, SearchQuery};

pub async fn search_species(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResultItem>>, ApiError> {
    let results = state.search_service.search(&query.q, query.capped_limit()).await?;
    Ok(Json(results))
}

pub async fn list_species(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CanonicalSpecies>>, ApiError> {
    Ok(Json(state.species_service.find_all().await?))
}

pub async fn get_species(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CanonicalSpecies>, ApiError> {
    Ok(Json(state.species_service.find_one(&id).await?))
}

pub async fn resolve_species(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<CanonicalSpecies>, ApiError> {
    let species = state
        .species_service
        .resolve_or_create(&req.scientific_name, req.common_name.as_deref())
        .await?;
    Ok(Json(species))
}

/// `null` when the reference is blank (tree gets unlinked).
pub async fn link_species(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LinkRequest>,
) -> Result<Json<Option<CanonicalSpecies>>, ApiError> {
    Ok(Json(state.species_service.resolve_reference(&req.reference).await?))
}
