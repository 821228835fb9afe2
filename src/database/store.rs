use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::schema::TableSchema;
use crate::filter::{FilterData, FilterError};

/// One row as a JSON object keyed by column name.
pub type StoreRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Duplicate key {key} in {table}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("Malformed row from {table}: {reason}")]
    MalformedRow { table: &'static str, reason: String },
}

/// Persistence backend for resource tables.
///
/// Implementations stamp `created_at`/`updated_at` on insert, bump
/// `updated_at` on update, set `deleted_at` on soft delete, and never return
/// or touch rows whose `deleted_at` is set.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert `values` (which already carry `id`) and return the stored row.
    async fn insert(&self, table: &'static TableSchema, values: StoreRecord) -> Result<StoreRecord, StoreError>;

    async fn select(&self, table: &'static TableSchema, filter: &FilterData) -> Result<Vec<StoreRecord>, StoreError>;

    /// Apply `changes` to every row matching `filter`. Returns rows affected.
    async fn update(
        &self,
        table: &'static TableSchema,
        filter: &FilterData,
        changes: StoreRecord,
    ) -> Result<u64, StoreError>;

    /// Set the tombstone on every row matching `filter`. Returns rows affected.
    async fn soft_delete(&self, table: &'static TableSchema, filter: &FilterData) -> Result<u64, StoreError>;

    /// Cheap liveness probe for `/health`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
