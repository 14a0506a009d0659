//! Fakes shared by the service tests.

#![allow(clippy::unwrap_used, reason = "test helpers")]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use grove_core::{ExternalTaxonHit, SPECIES_TABLE};
use grove_storage::{Filter, MemoryStore, Row, RowQuery, RowStore, StorageError};
use grove_taxon::{TaxonError, TaxonSource};
use serde_json::json;
use tokio::sync::Barrier;

pub(crate) fn hit(key: i64, name: &str) -> ExternalTaxonHit {
    ExternalTaxonHit {
        key: Some(key),
        canonical_name: Some(name.to_owned()),
        ..ExternalTaxonHit::default()
    }
}

#[derive(Default)]
pub(crate) struct FakeTaxonSource {
    hits: Vec<ExternalTaxonHit>,
    fail_status: Option<u16>,
    vernacular: HashMap<i64, String>,
    images: HashMap<i64, Vec<String>>,
    countries: HashMap<i64, Vec<String>>,
    barrier: Option<Arc<Barrier>>,
    searches: AtomicUsize,
    lookups: AtomicUsize,
    requested: Mutex<Vec<usize>>,
}

impl FakeTaxonSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_hits(mut self, hits: Vec<ExternalTaxonHit>) -> Self {
        self.hits = hits;
        self
    }

    pub(crate) fn failing(mut self, status: u16) -> Self {
        self.fail_status = Some(status);
        self
    }

    pub(crate) fn with_vernacular(mut self, key: i64, name: &str) -> Self {
        self.vernacular.insert(key, name.to_owned());
        self
    }

    pub(crate) fn with_images(mut self, key: i64, urls: &[&str]) -> Self {
        self.images.insert(key, urls.iter().map(|u| (*u).to_owned()).collect());
        self
    }

    pub(crate) fn with_countries(mut self, key: i64, names: &[&str]) -> Self {
        self.countries.insert(key, names.iter().map(|c| (*c).to_owned()).collect());
        self
    }

    /// Every lookup waits on `barrier` before answering.
    pub(crate) fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub(crate) fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub(crate) fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// `max_candidates` of every search call, in call order.
    pub(crate) fn requested_candidates(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }

    async fn lookup(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
    }
}

#[async_trait]
impl TaxonSource for FakeTaxonSource {
    async fn search_taxa(
        &self,
        _query: &str,
        max_candidates: usize,
    ) -> Result<Vec<ExternalTaxonHit>, TaxonError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(max_candidates);
        match self.fail_status {
            Some(code) => Err(TaxonError::HttpStatus { code, body: "unavailable".to_owned() }),
            None => Ok(self.hits.clone()),
        }
    }

    async fn vernacular_name(&self, key: i64) -> Option<String> {
        self.lookup().await;
        self.vernacular.get(&key).cloned()
    }

    async fn occurrence_images(&self, key: i64, _cap: usize) -> Vec<String> {
        self.lookup().await;
        self.images.get(&key).cloned().unwrap_or_default()
    }

    async fn country_facet(&self, key: i64, _cap: usize) -> Vec<String> {
        self.lookup().await;
        self.countries.get(&key).cloned().unwrap_or_default()
    }
}

/// Memory store that counts calls and can be switched to fail every call.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemoryStore,
    failing: AtomicBool,
    selects: AtomicUsize,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl CountingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryStore::new().with_unique(SPECIES_TABLE, "scientific_name"),
            ..Self::default()
        }
    }

    pub(crate) fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub(crate) fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub(crate) fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.inserts() + self.updates()
    }

    /// Inserts a species row directly, bypassing the counters.
    pub(crate) async fn seed(&self, scientific_name: &str, common_name: Option<&str>) -> String {
        let serde_json::Value::Object(row) = json!({
            "scientific_name": scientific_name,
            "common_name": common_name,
        }) else {
            unreachable!("object literal");
        };
        let stored = self.inner.insert(SPECIES_TABLE, row).await.unwrap();
        stored["id"].as_str().unwrap().to_owned()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("connection refused".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl RowStore for CountingStore {
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Row>, StorageError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.select(table, query).await
    }

    async fn insert(&self, table: &str, values: Row) -> Result<Row, StorageError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.insert(table, values).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        values: Row,
    ) -> Result<Option<Row>, StorageError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update(table, filters, values).await
    }
}
