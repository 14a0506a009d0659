use serde_json::json;

use super::{TABLE, row, seed, species_store};
use crate::{Filter, Row, RowQuery, RowStore, StorageError};

#[tokio::test]
async fn insert_assigns_id_and_created_at() {
    let store = species_store();

    let inserted = store.insert(TABLE, row("Quercus alba", None)).await.unwrap();

    let id = inserted.get("id").and_then(|v| v.as_str()).unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert!(inserted.get("created_at").is_some());
    assert_eq!(inserted.get("common_name"), Some(&json!(null)));
}

#[tokio::test]
async fn unique_column_rejects_second_insert() {
    let store = species_store();
    store.insert(TABLE, row("Quercus alba", None)).await.unwrap();

    // when: inserting the same scientific name again
    let second = store.insert(TABLE, row("Quercus alba", Some("White Oak"))).await;

    // then: the store reports a duplicate and keeps one row
    assert!(matches!(second, Err(StorageError::Duplicate(_))));
    assert_eq!(store.row_count(TABLE).await, 1);
}

#[tokio::test]
async fn select_preserves_insertion_order_without_ordering() {
    let store = species_store();
    seed(&store, &[("Tilia americana", None), ("Acer rubrum", None), ("Betula nigra", None)]).await;

    let rows = store.select(TABLE, &RowQuery::new()).await.unwrap();
    let names: Vec<&str> =
        rows.iter().filter_map(|r| r.get("scientific_name").and_then(|v| v.as_str())).collect();
    assert_eq!(names, vec!["Tilia americana", "Acer rubrum", "Betula nigra"]);
}

#[tokio::test]
async fn select_orders_and_limits() {
    let store = species_store();
    seed(&store, &[("Tilia americana", None), ("Acer rubrum", None), ("Betula nigra", None)]).await;

    let query = RowQuery::new().order_by("scientific_name", true).limit(2);
    let rows = store.select(TABLE, &query).await.unwrap();
    let names: Vec<&str> =
        rows.iter().filter_map(|r| r.get("scientific_name").and_then(|v| v.as_str())).collect();
    assert_eq!(names, vec!["Acer rubrum", "Betula nigra"]);
}

#[tokio::test]
async fn descending_order_puts_nulls_first() {
    let store = species_store();
    seed(&store, &[("Acer rubrum", Some("Red Maple")), ("Abies fraseri", None)]).await;

    let asc = store.select(TABLE, &RowQuery::new().order_by("common_name", true)).await.unwrap();
    let desc = store.select(TABLE, &RowQuery::new().order_by("common_name", false)).await.unwrap();
    assert_eq!(asc[0].get("scientific_name"), Some(&json!("Acer rubrum")));
    assert_eq!(desc[0].get("scientific_name"), Some(&json!("Abies fraseri")));
}

#[tokio::test]
async fn select_one_of_unknown_table_is_none() {
    let store = species_store();
    let found = store.select_one("trees", &[Filter::eq("id", "x")]).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn update_merges_values_and_reads_back() {
    let store = species_store();
    let inserted = store.insert(TABLE, row("Quercus alba", None)).await.unwrap();
    let id = inserted.get("id").cloned().unwrap();

    let mut values = Row::new();
    values.insert("common_name".to_owned(), json!("White Oak"));
    let updated = store.update(TABLE, &[Filter::eq("id", id.clone())], values).await.unwrap().unwrap();

    assert_eq!(updated.get("id"), Some(&id));
    assert_eq!(updated.get("common_name"), Some(&json!("White Oak")));
    assert_eq!(updated.get("scientific_name"), Some(&json!("Quercus alba")));

    let reread = store.select_one(TABLE, &[Filter::eq("id", id)]).await.unwrap().unwrap();
    assert_eq!(reread, updated);
}

#[tokio::test]
async fn update_without_match_returns_none() {
    let store = species_store();
    seed(&store, &[("Quercus alba", None)]).await;

    let mut values = Row::new();
    values.insert("common_name".to_owned(), json!("White Oak"));
    let updated = store.update(TABLE, &[Filter::eq("id", "missing")], values).await.unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn update_into_existing_unique_value_is_duplicate() {
    let store = species_store();
    seed(&store, &[("Quercus alba", None), ("Quercus rubra", None)]).await;

    let mut values = Row::new();
    values.insert("scientific_name".to_owned(), json!("Quercus alba"));
    let result = store
        .update(TABLE, &[Filter::eq("scientific_name", "Quercus rubra")], values)
        .await;
    assert!(matches!(result, Err(StorageError::Duplicate(_))));
}

#[tokio::test]
async fn invalid_table_name_is_rejected() {
    let store = species_store();
    let result = store.select("species--", &RowQuery::new()).await;
    assert!(matches!(result, Err(StorageError::InvalidIdentifier(_))));
}
