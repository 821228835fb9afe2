use super::error::FilterError;
use super::types::{FilterOrderInfo, SortDirection};
use crate::database::schema::TableSchema;

pub struct FilterOrder;

impl FilterOrder {
    /// Parse an order specification such as `"title"` or `"created_at desc, title"`.
    /// Tokens without an explicit direction take `default_direction`.
    pub fn parse(order_by: &str, default_direction: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let default_sort = SortDirection::parse(default_direction)?;
        let mut out = Vec::new();
        for part in order_by.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.split_whitespace();
            if let Some(col) = it.next() {
                let sort = match it.next() {
                    Some(dir) => SortDirection::parse(dir)?,
                    None => default_sort,
                };
                if it.next().is_some() {
                    return Err(FilterError::InvalidOrder(trimmed.to_string()));
                }
                out.push(FilterOrderInfo { column: col.to_string(), sort });
            }
        }
        Ok(out)
    }

    pub fn generate(schema: &TableSchema, infos: &[FilterOrderInfo]) -> Result<String, FilterError> {
        if infos.is_empty() {
            return Ok(String::new());
        }
        let mut parts = Vec::with_capacity(infos.len());
        for info in infos {
            let column = schema
                .column(&info.column)
                .ok_or_else(|| FilterError::InvalidColumn(info.column.clone()))?;
            parts.push(format!("\"{}\" {}", column.name, info.sort.to_sql()));
        }
        Ok(format!("ORDER BY {}", parts.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Record, Resource};

    #[test]
    fn parses_single_column_with_default_direction() {
        let order = FilterOrder::parse("title", "desc").unwrap();
        assert_eq!(order, vec![FilterOrderInfo { column: "title".into(), sort: SortDirection::Desc }]);
    }

    #[test]
    fn explicit_direction_wins_over_default() {
        let order = FilterOrder::parse("created_at asc, title", "desc").unwrap();
        assert_eq!(order[0].sort, SortDirection::Asc);
        assert_eq!(order[1].sort, SortDirection::Desc);
    }

    #[test]
    fn empty_order_generates_nothing() {
        assert!(FilterOrder::parse("", "").unwrap().is_empty());
        assert_eq!(FilterOrder::generate(Record::schema(), &[]).unwrap(), "");
    }

    #[test]
    fn generate_validates_columns() {
        let order = FilterOrder::parse("title desc", "").unwrap();
        assert_eq!(FilterOrder::generate(Record::schema(), &order).unwrap(), "ORDER BY \"title\" DESC");

        let bad = FilterOrder::parse("password", "").unwrap();
        assert!(FilterOrder::generate(Record::schema(), &bad).is_err());
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(FilterOrder::parse("title desc nulls", "").is_err());
    }
}
