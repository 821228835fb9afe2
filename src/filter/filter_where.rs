use serde_json::Value;

use super::error::FilterError;
use super::types::FilterWhereInfo;
use crate::database::schema::{TableSchema, DELETED_AT};

pub struct FilterWhere<'a> {
    schema: &'a TableSchema,
    param_values: Vec<Value>,
    param_index: usize,
}

impl<'a> FilterWhere<'a> {
    pub fn new(schema: &'a TableSchema, starting_param_index: usize) -> Self {
        Self {
            schema,
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Build the WHERE body (without the keyword) and its bound values.
    /// Placeholders are numbered from `starting_param_index + 1`.
    pub fn generate(
        schema: &'a TableSchema,
        conditions: &[FilterWhereInfo],
        starting_param_index: usize,
    ) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(schema, starting_param_index);
        filter_where.build(conditions)
    }

    fn build(&mut self, conditions: &[FilterWhereInfo]) -> Result<(String, Vec<Value>), FilterError> {
        let mut sql_conditions = vec![format!("\"{}\" IS NULL", DELETED_AT)];
        for condition in conditions {
            sql_conditions.push(self.build_sql_condition(condition)?);
        }
        Ok((sql_conditions.join(" AND "), std::mem::take(&mut self.param_values)))
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        let column = self
            .schema
            .column(&condition.column)
            .ok_or_else(|| FilterError::InvalidColumn(condition.column.clone()))?;

        if condition.data.is_null() {
            return Ok(format!("\"{}\" IS NULL", column.name));
        }

        let placeholder = self.push_param(condition.data.clone());
        Ok(format!(
            "\"{}\" = CAST({} AS {})",
            column.name,
            placeholder,
            column.kind.pg_type()
        ))
    }

    fn push_param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
