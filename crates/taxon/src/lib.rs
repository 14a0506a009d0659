//! Taxon source client for grove
//!
//! Talks to the GBIF species and occurrence APIs. Only the top-level species
//! search reports failures; every other lookup degrades to an empty value.

mod client;
mod config;
mod error;
mod gbif_types;
mod source;


pub use client::GbifClient;
pub use config::TaxonClientConfig;
pub use error::TaxonError;
pub use source::TaxonSource;
