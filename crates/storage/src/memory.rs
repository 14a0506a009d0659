//! In-process row store.
//!
//! Keeps rows per table in insertion order. Assigns a UUID `id` and an
//! RFC 3339 `created_at` when the caller omits them, and enforces the unique
//! columns registered through [`MemoryStore::with_unique`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Filter, Row, RowQuery, RowStore, StorageError, validate_identifier};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Row>>>>,
    unique: Arc<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a unique constraint on `table.column`, mirroring a
    /// `UNIQUE` index in the relational schema.
    #[must_use]
    pub fn with_unique(mut self, table: &str, column: &str) -> Self {
        Arc::make_mut(&mut self.unique)
            .entry(table.to_owned())
            .or_default()
            .push(column.to_owned());
        self
    }

    /// Number of rows currently held in `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    fn check_unique(
        &self,
        table: &str,
        rows: &[Row],
        candidate: &Row,
        skip: Option<usize>,
    ) -> Result<(), StorageError> {
        let Some(columns) = self.unique.get(table) else {
            return Ok(());
        };
        for column in columns {
            let Some(value) = candidate.get(column).filter(|v| !v.is_null()) else {
                continue;
            };
            let clash = rows
                .iter()
                .enumerate()
                .any(|(i, row)| Some(i) != skip && row.get(column) == Some(value));
            if clash {
                return Err(StorageError::Duplicate(format!("{table}.{column} = {value}")));
            }
        }
        Ok(())
    }
}

fn validate_columns(row: &Row) -> Result<(), StorageError> {
    row.keys().try_for_each(|k| validate_identifier(k))
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Row>, StorageError> {
        validate_identifier(table)?;
        query.validate()?;
        let tables = self.tables.read().await;
        let Some(rows) = tables.get(table) else {
            return Ok(Vec::new());
        };
        let mut matched: Vec<Row> = rows.iter().filter(|r| query.matches(r)).cloned().collect();
        if let Some(order) = &query.order {
            matched.sort_by(|a, b| order.compare(a, b));
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn insert(&self, table: &str, mut values: Row) -> Result<Row, StorageError> {
        validate_identifier(table)?;
        validate_columns(&values)?;
        values
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        values
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_owned()).or_default();
        self.check_unique(table, rows, &values, None)?;
        rows.push(values.clone());
        Ok(values)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        values: Row,
    ) -> Result<Option<Row>, StorageError> {
        validate_identifier(table)?;
        validate_columns(&values)?;
        filters.iter().try_for_each(Filter::validate)?;

        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(None);
        };
        let targets: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| filters.iter().all(|f| f.matches(r)))
            .map(|(i, _)| i)
            .collect();

        let mut first = None;
        for index in targets {
            let mut updated = rows[index].clone();
            updated.extend(values.clone());
            self.check_unique(table, rows, &updated, Some(index))?;
            if first.is_none() {
                first = Some(updated.clone());
            }
            rows[index] = updated;
        }
        Ok(first)
    }
}
