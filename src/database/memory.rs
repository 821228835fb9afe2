use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::schema::{ColumnKind, TableSchema, CREATED_AT, DELETED_AT, ID, UPDATED_AT};
use crate::database::store::{Store, StoreError, StoreRecord};
use crate::filter::{Filter, FilterData, FilterError, FilterWhereInfo, SortDirection};

/// In-process [`Store`] used when no database is configured and by tests.
///
/// Rows keep insertion order, which is the order returned when no ordering
/// is requested. Timestamps are stored as fixed-width RFC 3339 strings so
/// they sort correctly as text.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Vec<StoreRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row of a table, tombstoned ones included. For assertions in tests.
    pub async fn raw_rows(&self, table: &TableSchema) -> Vec<StoreRecord> {
        self.tables.read().await.get(table.name).cloned().unwrap_or_default()
    }

    fn now() -> Value {
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    /// Same validation the SQL renderer applies, so both backends reject the same input.
    fn validate(table: &TableSchema, filter: &FilterData) -> Result<(), FilterError> {
        Filter::new(table, filter.clone())?.to_sql()?;
        Ok(())
    }

    fn matches(table: &TableSchema, row: &StoreRecord, conditions: &[FilterWhereInfo]) -> bool {
        let live = row.get(DELETED_AT).map_or(true, Value::is_null);
        live && conditions.iter().all(|c| {
            let actual = row.get(&c.column).unwrap_or(&Value::Null);
            let kind = table.column(&c.column).map(|col| col.kind);
            values_equal(kind, actual, &c.data)
        })
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, table: &'static TableSchema, mut values: StoreRecord) -> Result<StoreRecord, StoreError> {
        for name in values.keys() {
            if table.column(name).is_none() {
                return Err(FilterError::InvalidColumn(name.clone()).into());
            }
        }
        let now = Self::now();
        values.entry(CREATED_AT).or_insert_with(|| now.clone());
        values.entry(UPDATED_AT).or_insert_with(|| now.clone());
        values.entry(DELETED_AT).or_insert(Value::Null);

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.name).or_default();
        let id = values.get(ID).cloned().unwrap_or(Value::Null);
        if rows.iter().any(|r| values_equal(Some(ColumnKind::Uuid), r.get(ID).unwrap_or(&Value::Null), &id)) {
            return Err(StoreError::DuplicateKey { table: table.name, key: id.to_string() });
        }
        rows.push(values.clone());
        Ok(values)
    }

    async fn select(&self, table: &'static TableSchema, filter: &FilterData) -> Result<Vec<StoreRecord>, StoreError> {
        Self::validate(table, filter)?;
        let tables = self.tables.read().await;
        let mut rows: Vec<StoreRecord> = tables
            .get(table.name)
            .map(|rows| {
                rows.iter()
                    .filter(|row| Self::matches(table, row, &filter.where_clause))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(tables);

        if !filter.order.is_empty() {
            rows.sort_by(|a, b| {
                for info in &filter.order {
                    let ord = compare_values(
                        a.get(&info.column).unwrap_or(&Value::Null),
                        b.get(&info.column).unwrap_or(&Value::Null),
                    );
                    let ord = match info.sort {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }

        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let limit = filter.limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(
        &self,
        table: &'static TableSchema,
        filter: &FilterData,
        changes: StoreRecord,
    ) -> Result<u64, StoreError> {
        Self::validate(table, filter)?;
        if changes.is_empty() {
            return Err(FilterError::EmptyChanges.into());
        }
        for name in changes.keys() {
            if table.column(name).is_none() {
                return Err(FilterError::InvalidColumn(name.clone()).into());
            }
        }
        let now = Self::now();
        let mut tables = self.tables.write().await;
        let mut affected = 0;
        if let Some(rows) = tables.get_mut(table.name) {
            for row in rows.iter_mut().filter(|row| Self::matches(table, row, &filter.where_clause)) {
                for (k, v) in &changes {
                    row.insert(k.clone(), v.clone());
                }
                row.insert(UPDATED_AT.to_string(), now.clone());
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn soft_delete(&self, table: &'static TableSchema, filter: &FilterData) -> Result<u64, StoreError> {
        Self::validate(table, filter)?;
        let now = Self::now();
        let mut tables = self.tables.write().await;
        let mut affected = 0;
        if let Some(rows) = tables.get_mut(table.name) {
            for row in rows.iter_mut().filter(|row| Self::matches(table, row, &filter.where_clause)) {
                row.insert(DELETED_AT.to_string(), now.clone());
                affected += 1;
            }
        }
        Ok(affected)
    }
}

fn values_equal(kind: Option<ColumnKind>, a: &Value, b: &Value) -> bool {
    match (kind, a, b) {
        (Some(ColumnKind::Uuid), Value::String(x), Value::String(y)) => {
            match (Uuid::parse_str(x), Uuid::parse_str(y)) {
                (Ok(x), Ok(y)) => x == y,
                _ => x == y,
            }
        }
        _ => a == b,
    }
}

/// Mirrors PostgreSQL's default: NULL sorts after every value in ascending order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}
