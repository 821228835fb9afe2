use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::database::query_builder::{bind_param_query, QueryBuilder};
use crate::database::schema::TableSchema;
use crate::database::store::{Store, StoreError, StoreRecord};
use crate::filter::types::SqlResult;
use crate::filter::FilterData;

/// [`Store`] over a shared PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(&self, table: &'static TableSchema, sql: &SqlResult) -> Result<Vec<StoreRecord>, StoreError> {
        tracing::debug!(sql = %sql.query, params = ?sql.params, "query");
        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| {
                let value: Value = row.try_get("row")?;
                into_record(table, value)
            })
            .collect()
    }

    async fn execute(&self, sql: &SqlResult) -> Result<u64, StoreError> {
        tracing::debug!(sql = %sql.query, params = ?sql.params, "execute");
        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query(q, p);
        }
        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert(&self, table: &'static TableSchema, values: StoreRecord) -> Result<StoreRecord, StoreError> {
        let sql = QueryBuilder::new(table).insert(&values)?;
        self.fetch_rows(table, &sql)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::MalformedRow {
                table: table.name,
                reason: "insert returned no row".to_string(),
            })
    }

    async fn select(&self, table: &'static TableSchema, filter: &FilterData) -> Result<Vec<StoreRecord>, StoreError> {
        let sql = QueryBuilder::new(table).select(filter)?;
        self.fetch_rows(table, &sql).await
    }

    async fn update(
        &self,
        table: &'static TableSchema,
        filter: &FilterData,
        changes: StoreRecord,
    ) -> Result<u64, StoreError> {
        let sql = QueryBuilder::new(table).update(filter, &changes)?;
        self.execute(&sql).await
    }

    async fn soft_delete(&self, table: &'static TableSchema, filter: &FilterData) -> Result<u64, StoreError> {
        let sql = QueryBuilder::new(table).soft_delete(filter)?;
        self.execute(&sql).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn into_record(table: &'static TableSchema, value: Value) -> Result<StoreRecord, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::MalformedRow {
            table: table.name,
            reason: format!("expected JSON object, got {}", other),
        }),
    }
}
