use serde_json::Value;
use sqlx::postgres::PgArguments;

use crate::database::schema::{TableSchema, DELETED_AT, UPDATED_AT};
use crate::database::store::StoreRecord;
use crate::filter::types::SqlResult;
use crate::filter::{Filter, FilterData, FilterError};

/// Builds the write statements; reads go through [`Filter::to_sql`].
pub struct QueryBuilder<'a> {
    schema: &'a TableSchema,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    pub fn select(&self, filter_data: &FilterData) -> Result<SqlResult, FilterError> {
        Filter::new(self.schema, filter_data.clone())?.to_sql()
    }

    /// INSERT returning the stored row as JSON. Columns with database defaults
    /// (`created_at`, `updated_at`) are left out unless supplied.
    pub fn insert(&self, values: &StoreRecord) -> Result<SqlResult, FilterError> {
        if values.is_empty() {
            return Err(FilterError::EmptyChanges);
        }
        let mut columns = Vec::with_capacity(values.len());
        let mut placeholders = Vec::with_capacity(values.len());
        let mut params = Vec::with_capacity(values.len());
        for (name, value) in values {
            let column = self
                .schema
                .column(name)
                .ok_or_else(|| FilterError::InvalidColumn(name.clone()))?;
            params.push(value.clone());
            columns.push(format!("\"{}\"", column.name));
            placeholders.push(format!("CAST(${} AS {})", params.len(), column.kind.pg_type()));
        }
        let query = format!(
            "WITH inserted AS (INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING *) SELECT row_to_json(inserted) AS row FROM inserted",
            self.schema.name,
            columns.join(", "),
            placeholders.join(", ")
        );
        Ok(SqlResult { query, params })
    }

    /// UPDATE of whitelisted columns; `updated_at` is always bumped.
    pub fn update(&self, filter_data: &FilterData, changes: &StoreRecord) -> Result<SqlResult, FilterError> {
        if changes.is_empty() {
            return Err(FilterError::EmptyChanges);
        }
        let mut assignments = Vec::with_capacity(changes.len() + 1);
        let mut params = Vec::with_capacity(changes.len());
        for (name, value) in changes {
            let column = self
                .schema
                .column(name)
                .ok_or_else(|| FilterError::InvalidColumn(name.clone()))?;
            params.push(value.clone());
            assignments.push(format!(
                "\"{}\" = CAST(${} AS {})",
                column.name,
                params.len(),
                column.kind.pg_type()
            ));
        }
        assignments.push(format!("\"{}\" = now()", UPDATED_AT));

        let where_sql = Filter::new(self.schema, filter_data.clone())?.to_where_sql(params.len())?;
        params.extend(where_sql.params);
        let query = format!(
            "UPDATE \"{}\" SET {} WHERE {}",
            self.schema.name,
            assignments.join(", "),
            where_sql.query
        );
        Ok(SqlResult { query, params })
    }

    pub fn soft_delete(&self, filter_data: &FilterData) -> Result<SqlResult, FilterError> {
        let where_sql = Filter::new(self.schema, filter_data.clone())?.to_where_sql(0)?;
        let query = format!(
            "UPDATE \"{}\" SET \"{}\" = now() WHERE {}",
            self.schema.name, DELETED_AT, where_sql.query
        );
        Ok(SqlResult { query, params: where_sql.params })
    }
}

pub fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        // Only scalar columns exist; structured values travel as their JSON text.
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
