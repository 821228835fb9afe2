use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterData, SqlResult};
use crate::database::schema::TableSchema;

/// Validated [`FilterData`] bound to a table, ready to render as SQL.
pub struct Filter<'a> {
    schema: &'a TableSchema,
    data: FilterData,
}

impl<'a> Filter<'a> {
    pub fn new(schema: &'a TableSchema, data: FilterData) -> Result<Self, FilterError> {
        if let Some(limit) = data.limit {
            if limit < 0 {
                return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
            }
        }
        if let Some(offset) = data.offset {
            if offset < 0 {
                return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
            }
        }
        Ok(Self { schema, data })
    }

    /// `SELECT` returning each row as a single JSON object column named `row`.
    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(self.schema, &self.data.where_clause, 0)?;
        let order_clause = FilterOrder::generate(self.schema, &self.data.order)?;
        let limit_clause = self.build_limit_clause();

        let query = [
            "SELECT row_to_json(t) AS row".to_string(),
            format!("FROM \"{}\" t", self.schema.name),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        Ok(SqlResult { query, params })
    }

    /// WHERE body only, with placeholders numbered after `starting_param_index`.
    /// Used by UPDATE statements whose SET list already consumed some placeholders.
    pub fn to_where_sql(&self, starting_param_index: usize) -> Result<SqlResult, FilterError> {
        let (query, params) = FilterWhere::generate(self.schema, &self.data.where_clause, starting_param_index)?;
        Ok(SqlResult { query, params })
    }

    fn build_limit_clause(&self) -> String {
        let mut parts = vec![];
        if let Some(l) = self.data.limit {
            parts.push(format!("LIMIT {}", l));
        }
        if let Some(o) = self.data.offset.filter(|o| *o > 0) {
            parts.push(format!("OFFSET {}", o));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOrderInfo;
    use crate::filter::SortDirection;
    use crate::resources::{Resource, Todo};
    use serde_json::json;

    #[test]
    fn renders_full_select() {
        let data = FilterData {
            order: vec![FilterOrderInfo { column: "title".into(), sort: SortDirection::Desc }],
            limit: Some(2),
            offset: Some(1),
            ..FilterData::new().eq("title", "Todo 1")
        };
        let sql = Filter::new(Todo::schema(), data).unwrap().to_sql().unwrap();
        assert_eq!(
            sql.query,
            "SELECT row_to_json(t) AS row FROM \"todos\" t WHERE \"deleted_at\" IS NULL AND \"title\" = CAST($1 AS text) ORDER BY \"title\" DESC LIMIT 2 OFFSET 1"
        );
        assert_eq!(sql.params, vec![json!("Todo 1")]);
    }

    #[test]
    fn offset_without_limit_is_kept() {
        let data = FilterData { offset: Some(3), ..FilterData::new() };
        let sql = Filter::new(Todo::schema(), data).unwrap().to_sql().unwrap();
        assert!(sql.query.ends_with("OFFSET 3"), "{}", sql.query);
    }

    #[test]
    fn negative_pagination_is_rejected() {
        let data = FilterData { limit: Some(-1), ..FilterData::new() };
        assert!(matches!(Filter::new(Todo::schema(), data), Err(FilterError::InvalidLimit(_))));
        let data = FilterData { offset: Some(-1), ..FilterData::new() };
        assert!(matches!(Filter::new(Todo::schema(), data), Err(FilterError::InvalidOffset(_))));
    }
}
