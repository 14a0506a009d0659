//! Conversions between store rows and canonical species.

use grove_core::{CanonicalSpecies, SPECIES_TABLE};
use grove_storage::{Filter, Row, RowStore, StorageError};
use serde_json::Value;

pub(crate) const ID: &str = "id";
pub(crate) const SCIENTIFIC_NAME: &str = "scientific_name";
pub(crate) const COMMON_NAME: &str = "common_name";

pub(crate) fn species_from_row(row: Row) -> Result<CanonicalSpecies, StorageError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Exact, case-sensitive lookup by scientific name. Read-only.
pub(crate) async fn find_by_scientific_name(
    store: &dyn RowStore,
    scientific_name: &str,
) -> Result<Option<CanonicalSpecies>, StorageError> {
    store
        .select_one(SPECIES_TABLE, &[Filter::eq(SCIENTIFIC_NAME, scientific_name)])
        .await?
        .map(species_from_row)
        .transpose()
}
