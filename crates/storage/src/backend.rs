//! Unified storage backend with enum dispatch.

use async_trait::async_trait;

use crate::{Filter, MemoryStore, Row, RowQuery, RowStore, StorageError};

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Memory(s) => <MemoryStore as RowStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::PgRowStore as RowStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory(MemoryStore),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgRowStore),
}

impl StorageBackend {
    /// In-memory backend with the same unique constraint as the SQL schema.
    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStore::new().with_unique(grove_core::SPECIES_TABLE, "scientific_name"))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::PgRowStore::connect(database_url, max_connections).await?))
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl RowStore for StorageBackend {
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Row>, StorageError> {
        dispatch!(self, select(table, query))
    }

    async fn select_one(&self, table: &str, filters: &[Filter]) -> Result<Option<Row>, StorageError> {
        dispatch!(self, select_one(table, filters))
    }

    async fn insert(&self, table: &str, values: Row) -> Result<Row, StorageError> {
        dispatch!(self, insert(table, values))
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        values: Row,
    ) -> Result<Option<Row>, StorageError> {
        dispatch!(self, update(table, filters, values))
    }
}
