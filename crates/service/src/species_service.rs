use std::sync::Arc;

use grove_core::{CanonicalSpecies, SPECIES_TABLE, SpeciesReference};
use grove_storage::{Filter, Row, RowQuery, RowStore, StorageError};
use serde_json::Value;

use crate::ServiceError;
use crate::rows::{COMMON_NAME, ID, SCIENTIFIC_NAME, find_by_scientific_name, species_from_row};

/// Canonical species records: lookups, resolve-or-create and reference linking.
pub struct SpeciesService {
    store: Arc<dyn RowStore>,
}

impl SpeciesService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// Returns the canonical row for `scientific_name`, creating it when absent.
    ///
    /// A provided common name that differs from the stored one replaces it.
    /// There is no transaction around the lookup and the write.
    pub async fn resolve_or_create(
        &self,
        scientific_name: &str,
        common_name: Option<&str>,
    ) -> Result<CanonicalSpecies, ServiceError> {
        let scientific_name = scientific_name.trim();
        if scientific_name.is_empty() {
            return Err(ServiceError::InvalidInput("scientific name is empty".to_owned()));
        }
        let common_name = common_name.map(str::trim).filter(|n| !n.is_empty());

        if let Some(existing) = find_by_scientific_name(self.store.as_ref(), scientific_name).await?
        {
            return match common_name {
                Some(name) if existing.common_name.as_deref() != Some(name) => {
                    self.update_common_name(existing, name).await
                },
                _ => Ok(existing),
            };
        }

        let mut values = Row::new();
        values.insert(SCIENTIFIC_NAME.to_owned(), Value::from(scientific_name));
        values.insert(COMMON_NAME.to_owned(), common_name.map_or(Value::Null, Value::from));
        let created = species_from_row(self.store.insert(SPECIES_TABLE, values).await?)?;
        tracing::info!(id = %created.id, scientific_name, "created species");
        Ok(created)
    }

    async fn update_common_name(
        &self,
        mut existing: CanonicalSpecies,
        common_name: &str,
    ) -> Result<CanonicalSpecies, ServiceError> {
        let mut values = Row::new();
        values.insert(COMMON_NAME.to_owned(), Value::from(common_name));
        let filters = [Filter::eq(ID, existing.id.to_string())];
        match self.store.update(SPECIES_TABLE, &filters, values).await? {
            Some(row) => Ok(species_from_row(row)?),
            None => {
                existing.common_name = Some(common_name.to_owned());
                Ok(existing)
            },
        }
    }

    pub async fn find_one(&self, id: &str) -> Result<CanonicalSpecies, ServiceError> {
        let row = self
            .store
            .select_one(SPECIES_TABLE, &[Filter::eq(ID, id)])
            .await?
            .ok_or_else(|| StorageError::NotFound { entity: "species", id: id.to_owned() })?;
        Ok(species_from_row(row)?)
    }

    /// All canonical rows, ordered by scientific name.
    pub async fn find_all(&self) -> Result<Vec<CanonicalSpecies>, ServiceError> {
        let query = RowQuery::new().order_by(SCIENTIFIC_NAME, true);
        let rows = self.store.select(SPECIES_TABLE, &query).await?;
        Ok(rows.into_iter().map(species_from_row).collect::<Result<_, _>>()?)
    }

    /// Species a tree should be linked to for `reference`.
    ///
    /// Blank means unlink (`None`). An id must already exist, anything else
    /// is taken as a scientific name and resolved or created.
    pub async fn resolve_reference(
        &self,
        reference: &str,
    ) -> Result<Option<CanonicalSpecies>, ServiceError> {
        match SpeciesReference::parse(reference) {
            None => Ok(None),
            Some(SpeciesReference::Id(id)) => {
                let id = id.to_string();
                match self.store.select_one(SPECIES_TABLE, &[Filter::eq(ID, id.as_str())]).await? {
                    Some(row) => Ok(Some(species_from_row(row)?)),
                    None => Err(ServiceError::InvalidReference(id)),
                }
            },
            Some(SpeciesReference::Name(name)) => {
                self.resolve_or_create(&name, None).await.map(Some)
            },
        }
    }
}

#[cfg(test)]
#[path = "species_service_tests.rs"]
mod tests;
