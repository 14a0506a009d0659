//! HTTP API server for grove.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use axum::{
    Json, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use grove_service::{SearchService, SpeciesService};

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// External search with local fallback
    pub search_service: Arc<SearchService>,
    /// Canonical species records
    pub species_service: Arc<SpeciesService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/species", get(handlers::species::list_species))
        .route("/api/species/search", get(handlers::species::search_species))
        .route("/api/species/resolve", post(handlers::species::resolve_species))
        .route("/api/species/link", post(handlers::species::link_species))
        .route("/api/species/{id}", get(handlers::species::get_species))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
