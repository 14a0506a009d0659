//! Row store trait abstraction
//!
//! The only interface the service layer uses to read and write rows.

use async_trait::async_trait;

use crate::{Filter, Row, RowQuery, StorageError};

/// Generic row store: select, insert and update with equality/substring filters.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Rows matching the query, in the query's order (store order when unordered).
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Row>, StorageError>;

    /// First row matching all filters.
    async fn select_one(&self, table: &str, filters: &[Filter]) -> Result<Option<Row>, StorageError> {
        let query = RowQuery { filters: filters.to_vec(), order: None, limit: Some(1) };
        Ok(self.select(table, &query).await?.into_iter().next())
    }

    /// Inserts a row and returns it as stored (with store-assigned columns).
    async fn insert(&self, table: &str, values: Row) -> Result<Row, StorageError>;

    /// Updates matching rows. Returns the first updated row when the store
    /// can read it back.
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        values: Row,
    ) -> Result<Option<Row>, StorageError>;
}
