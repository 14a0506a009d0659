//! PostgreSQL schema migrations for grove storage.

use sqlx::PgPool;

use crate::StorageError;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    // gen_random_uuid() is built in from PostgreSQL 13.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS species (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            scientific_name TEXT NOT NULL,
            common_name TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    // Resolve-or-create is not transactional; this index turns a lost race
    // into a reported duplicate instead of a second canonical row.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_species_scientific_name ON species (scientific_name)",
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_species_common_name ON species (LOWER(common_name))",
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::Migration(e.to_string()))?;

    tracing::debug!("species migrations applied");
    Ok(())
}
