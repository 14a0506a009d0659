//! PostgreSQL row store using sqlx.
//!
//! Rows travel as JSONB: reads use `to_jsonb(r)`, writes go through
//! `jsonb_populate_record(NULL::<table>, $1)` so column types come from the
//! table definition rather than from the caller.

use async_trait::async_trait;
use grove_core::{PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::pg_migrations::run_pg_migrations;
use crate::{Filter, Row, RowQuery, RowStore, StorageError, escape_like, validate_identifier};

#[derive(Clone, Debug)]
pub struct PgRowStore {
    pool: PgPool,
}

impl PgRowStore {
    /// Connects, applies migrations and returns the store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await?;
        tracing::info!(max_connections, "PgRowStore initialized");
        Ok(Self { pool })
    }
}

const ID_COLUMN: &str = "id";

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Eq { column, value: Value::Null } => {
            qb.push(format_args!("r.{column} IS NULL"));
        },
        // Typed comparison on the primary key keeps its index usable; an
        // id that is not a UUID matches nothing.
        Filter::Eq { column, value } if column == ID_COLUMN => {
            match value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok()) {
                Some(id) => {
                    qb.push(format_args!("r.{column} = "));
                    qb.push_bind(id);
                },
                None => {
                    qb.push("FALSE");
                },
            }
        },
        Filter::Eq { column, value } => {
            qb.push(format_args!("r.{column}::text = "));
            qb.push_bind(value_as_text(value));
        },
        Filter::Contains { column, needle } => {
            qb.push(format_args!("r.{column} ILIKE "));
            qb.push_bind(format!("%{}%", escape_like(needle)));
        },
        Filter::Any(filters) if filters.is_empty() => {
            qb.push("FALSE");
        },
        Filter::Any(filters) => {
            qb.push("(");
            for (i, f) in filters.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                push_filter(qb, f);
            }
            qb.push(")");
        },
    }
}

fn push_where(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for (i, f) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_filter(qb, f);
    }
}

fn column_list(values: &Row) -> Result<String, StorageError> {
    values.keys().try_for_each(|k| validate_identifier(k))?;
    Ok(values.keys().map(String::as_str).collect::<Vec<_>>().join(", "))
}

#[async_trait]
impl RowStore for PgRowStore {
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Row>, StorageError> {
        validate_identifier(table)?;
        query.validate()?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT to_jsonb(r) FROM {table} AS r"));
        push_where(&mut qb, &query.filters);
        if let Some(order) = &query.order {
            let direction = if order.ascending { "ASC" } else { "DESC" };
            qb.push(format_args!(" ORDER BY r.{} {direction}", order.column));
        }
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows: Vec<Json<Row>> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn insert(&self, table: &str, values: Row) -> Result<Row, StorageError> {
        validate_identifier(table)?;
        let mut qb = if values.is_empty() {
            QueryBuilder::<Postgres>::new(format!("INSERT INTO {table} AS r DEFAULT VALUES"))
        } else {
            let columns = column_list(&values)?;
            let mut qb = QueryBuilder::<Postgres>::new(format!(
                "INSERT INTO {table} AS r ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, "
            ));
            qb.push_bind(Json(values));
            qb.push(")");
            qb
        };
        qb.push(" RETURNING to_jsonb(r)");

        let Json(row): Json<Row> = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        values: Row,
    ) -> Result<Option<Row>, StorageError> {
        validate_identifier(table)?;
        filters.iter().try_for_each(Filter::validate)?;
        if values.is_empty() {
            return self.select_one(table, filters).await;
        }
        column_list(&values)?;

        let assignments = values
            .keys()
            .map(|c| format!("{c} = s.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "UPDATE {table} AS r SET {assignments} FROM jsonb_populate_record(NULL::{table}, "
        ));
        qb.push_bind(Json(values));
        qb.push(") AS s");
        push_where(&mut qb, filters);
        qb.push(" RETURNING to_jsonb(r)");

        let rows: Vec<Json<Row>> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().next().map(|Json(row)| row))
    }
}
