//! Test utilities and module declarations for storage tests.

#![allow(clippy::unwrap_used, reason = "test code")]

use serde_json::json;

use crate::{MemoryStore, Row, RowStore};

pub const TABLE: &str = "species";

pub fn species_store() -> MemoryStore {
    MemoryStore::new().with_unique(TABLE, "scientific_name")
}

pub fn row(scientific_name: &str, common_name: Option<&str>) -> Row {
    let mut row = Row::new();
    row.insert("scientific_name".to_owned(), json!(scientific_name));
    row.insert("common_name".to_owned(), json!(common_name));
    row
}

pub async fn seed(store: &MemoryStore, rows: &[(&str, Option<&str>)]) {
    for (name, common) in rows {
        store.insert(TABLE, row(name, *common)).await.unwrap();
    }
}

mod memory_tests;
