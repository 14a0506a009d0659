use anyhow::Result;
use grove_http::{AppState, create_router};
use grove_service::{SearchService, SpeciesService};
use std::sync::Arc;

use crate::{open_store, taxon_client};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let store = open_store().await?;
    let taxa = taxon_client()?;

    let state = Arc::new(AppState {
        search_service: Arc::new(SearchService::new(store.clone(), taxa)),
        species_service: Arc::new(SpeciesService::new(store)),
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
