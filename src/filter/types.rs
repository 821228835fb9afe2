use serde_json::Value;

use super::error::FilterError;

/// Backend-neutral query description shared by every store.
///
/// Conditions are equality predicates joined with AND. Soft-deleted rows are
/// always excluded; there is no way to ask for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterData {
    pub where_clause: Vec<FilterWhereInfo>,
    pub order: Vec<FilterOrderInfo>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FilterData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition, builder style.
    pub fn eq(mut self, column: impl Into<String>, data: impl Into<Value>) -> Self {
        self.push_eq(column, data);
        self
    }

    pub fn push_eq(&mut self, column: impl Into<String>, data: impl Into<Value>) {
        self.where_clause.push(FilterWhereInfo {
            column: column.into(),
            data: data.into(),
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub column: String,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Empty input means ascending. Anything other than asc/desc is rejected
    /// instead of being spliced into SQL.
    pub fn parse(direction: &str) -> Result<Self, FilterError> {
        let trimmed = direction.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if trimmed.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(FilterError::InvalidOrder(format!(
                "unknown sort direction '{}'",
                trimmed
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::parse("").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse(" desc ").unwrap(), SortDirection::Desc);
        assert!(SortDirection::parse("desc; drop table todos").is_err());
    }

    #[test]
    fn builder_collects_conditions_in_order() {
        let filter = FilterData::new().eq("id", "a").eq("owner_id", "b");
        let columns: Vec<_> = filter.where_clause.iter().map(|w| w.column.as_str()).collect();
        assert_eq!(columns, vec!["id", "owner_id"]);
    }
}
