//! Shared constants for grove.
//!
//! Centralizes the cost controls and caps used by the search pipeline.

/// Table holding canonical species rows.
pub const SPECIES_TABLE: &str = "species";

/// Queries shorter than this (after trimming) return no results without any I/O.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default number of search results when the caller does not specify a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Upper bound on a caller-supplied search limit (HTTP layer).
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Upper bound on the number of hits requested from the taxon source.
pub const MAX_EXTERNAL_CANDIDATES: usize = 50;

/// Upper bound on hits that get enriched per request.
/// Each enrichment fans out to several network calls, so this is independent of `limit`.
pub const MAX_ENRICHED_CANDIDATES: usize = 10;

/// Images kept per enriched candidate.
pub const MAX_IMAGES_PER_SPECIES: usize = 3;

/// Countries kept per enriched candidate.
pub const MAX_COUNTRIES_PER_SPECIES: usize = 5;

/// Default GBIF API base URL.
pub const DEFAULT_TAXON_URL: &str = "https://api.gbif.org/v1";

/// Default per-request timeout against the taxon source, in seconds.
pub const DEFAULT_TAXON_TIMEOUT_SECS: u64 = 15;

/// PostgreSQL connection pool: default maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
