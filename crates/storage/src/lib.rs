//! Row store adapter for grove
//!
//! A small generic row interface (select/insert/update with equality and
//! substring filters) over an in-memory store and PostgreSQL.

mod backend;
mod error;
mod memory;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
mod query;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use pg_storage::PgRowStore;
pub use query::{Filter, Order, Row, RowQuery, escape_like, validate_identifier};
pub use traits::RowStore;
