//! Service layer for grove
//!
//! Species search with external enrichment, local fallback search and
//! resolve-or-create, between the HTTP/CLI front ends and storage/taxon.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod enrichment;
mod error;
mod rows;
mod search_service;
mod species_service;

#[cfg(test)]
mod test_support;

pub use enrichment::enrich_hit;
pub use error::ServiceError;
pub use search_service::{SearchService, compare_results};
pub use species_service::SpeciesService;
