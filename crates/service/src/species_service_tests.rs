#![allow(clippy::unwrap_used, reason = "tests")]

use std::sync::Arc;

use super::SpeciesService;
use crate::ServiceError;
use crate::test_support::CountingStore;

fn service(store: &Arc<CountingStore>) -> SpeciesService {
    SpeciesService::new(store.clone())
}

#[tokio::test]
async fn resolve_or_create_is_idempotent() {
    let store = Arc::new(CountingStore::new());
    let species = service(&store);

    let first = species.resolve_or_create("Quercus alba", Some("White Oak")).await.unwrap();
    let second = species.resolve_or_create("Quercus alba", Some("White Oak")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.common_name.as_deref(), Some("White Oak"));
    assert_eq!(store.inserts(), 1);
    assert_eq!(store.updates(), 0);
}

#[tokio::test]
async fn resolve_or_create_trims_the_name() {
    let store = Arc::new(CountingStore::new());
    let species = service(&store);

    let created = species.resolve_or_create("  Quercus alba ", None).await.unwrap();
    let found = species.resolve_or_create("Quercus alba", None).await.unwrap();

    assert_eq!(created.scientific_name, "Quercus alba");
    assert_eq!(created.id, found.id);
    assert_eq!(created.common_name, None);
}

#[tokio::test]
async fn differing_common_name_updates_row() {
    // given
    let store = Arc::new(CountingStore::new());
    let id = store.seed("Acer rubrum", Some("Maple")).await;
    let species = service(&store);

    // when
    let updated = species.resolve_or_create("Acer rubrum", Some("Red Maple")).await.unwrap();

    // then
    assert_eq!(updated.id.to_string(), id);
    assert_eq!(updated.common_name.as_deref(), Some("Red Maple"));
    assert_eq!(store.updates(), 1);
    let stored = species.find_one(&id).await.unwrap();
    assert_eq!(stored.common_name.as_deref(), Some("Red Maple"));
}

#[tokio::test]
async fn absent_or_blank_common_name_leaves_row_unchanged() {
    let store = Arc::new(CountingStore::new());
    store.seed("Acer rubrum", Some("Red Maple")).await;
    let species = service(&store);

    let a = species.resolve_or_create("Acer rubrum", None).await.unwrap();
    let b = species.resolve_or_create("Acer rubrum", Some("  ")).await.unwrap();

    assert_eq!(a.common_name.as_deref(), Some("Red Maple"));
    assert_eq!(b.common_name.as_deref(), Some("Red Maple"));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn blank_scientific_name_is_rejected() {
    let store = Arc::new(CountingStore::new());

    let err = service(&store).resolve_or_create("   ", Some("Oak")).await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(store.selects(), 0);
}

#[tokio::test]
async fn store_failure_propagates() {
    let store = Arc::new(CountingStore::new());
    store.fail_all();

    let err = service(&store).resolve_or_create("Quercus alba", None).await.unwrap_err();

    assert!(matches!(err, ServiceError::Storage(_)));
}

#[tokio::test]
async fn find_one_reports_missing_row() {
    let store = Arc::new(CountingStore::new());

    let err = service(&store).find_one("6f1c1f0e-8d0b-4c57-9a57-0d7c1b0b9a11").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn find_all_orders_by_scientific_name() {
    let store = Arc::new(CountingStore::new());
    store.seed("Quercus alba", None).await;
    store.seed("Acer rubrum", Some("Red Maple")).await;
    store.seed("Pinus strobus", None).await;

    let all = service(&store).find_all().await.unwrap();

    let names: Vec<&str> = all.iter().map(|s| s.scientific_name.as_str()).collect();
    assert_eq!(names, ["Acer rubrum", "Pinus strobus", "Quercus alba"]);
}

#[tokio::test]
async fn blank_reference_unlinks() {
    let store = Arc::new(CountingStore::new());

    let linked = service(&store).resolve_reference("  ").await.unwrap();

    assert_eq!(linked, None);
    assert_eq!(store.selects(), 0);
}

#[tokio::test]
async fn null_literal_reference_unlinks_without_writes() {
    let store = Arc::new(CountingStore::new());

    let linked = service(&store).resolve_reference("null").await.unwrap();

    assert_eq!(linked, None);
    assert_eq!(store.writes(), 0);
    assert!(service(&store).find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn known_id_reference_resolves_without_writes() {
    let store = Arc::new(CountingStore::new());
    let id = store.seed("Quercus alba", Some("White Oak")).await;

    let linked = service(&store).resolve_reference(&id.to_uppercase()).await.unwrap().unwrap();

    assert_eq!(linked.id.to_string(), id);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn unknown_id_reference_is_invalid() {
    let store = Arc::new(CountingStore::new());

    let err = service(&store)
        .resolve_reference("6f1c1f0e-8d0b-4c57-9a57-0d7c1b0b9a11")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidReference(_)));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn name_reference_resolves_or_creates() {
    let store = Arc::new(CountingStore::new());
    let species = service(&store);

    let created = species.resolve_reference("Ginkgo biloba").await.unwrap().unwrap();
    let again = species.resolve_reference("Ginkgo biloba").await.unwrap().unwrap();

    assert_eq!(created.id, again.id);
    assert_eq!(created.scientific_name, "Ginkgo biloba");
    assert_eq!(store.inserts(), 1);
}
