//! Core types for grove
//!
//! Domain types and helpers shared by the storage, taxon, service and HTTP crates.

mod constants;
mod env_config;
mod name;
mod reference;
mod species;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use name::{collation_key, locale_compare, normalize_name};
pub use reference::SpeciesReference;
pub use species::*;
