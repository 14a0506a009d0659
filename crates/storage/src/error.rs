//! Failures of the species row store.

use thiserror::Error;

/// What can go wrong reading or writing `species` rows.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lookup by id matched no row.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A write collided with the unique `scientific_name` index, typically the
    /// losing side of two concurrent resolve-or-create calls.
    #[error("duplicate: {0}")]
    Duplicate(String),

    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Store cannot be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Table or column name that is not a plain SQL identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A stored row did not deserialize into `CanonicalSpecies`.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema setup for the `species` table failed.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// `RowNotFound` becomes `NotFound`, SQLSTATE 23505 (unique violation)
/// becomes `Duplicate`, anything else stays a `Database` error.
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "row JSON conversion".to_owned(),
            source: Box::new(err),
        }
    }
}
