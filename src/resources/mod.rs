//! The four CRUD resources and the generic machinery that serves them.
//!
//! Each resource is a model struct implementing [`Resource`], which ties it to
//! a table schema, its create/update/list option types and, optionally, the
//! column that records its owner.

pub mod error;
pub mod membership;
pub mod options;
pub mod organisation;
pub mod record;
pub mod repository;
pub mod todo;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::database::TableSchema;
use crate::filter::FilterWhereInfo;

pub use error::ResourceError;
pub use membership::{Membership, Relation};
pub use options::{ListOptions, Pagination, MAX_LIMIT};
pub use organisation::Organisation;
pub use record::Record;
pub use repository::{DataAccess, Repository};
pub use todo::Todo;

/// Columns every resource carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Pure input validation, run before any store access.
pub trait Validate {
    fn validate(&self) -> Result<(), ResourceError>;
}

pub trait CreateInput: Validate + Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Set the owner column from the caller's identity. No-op for unowned resources.
    fn assign_owner(&mut self, _owner: Uuid) {}
}

pub trait UpdateInput: Validate + Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {}

/// Per-resource list filters, turned into equality conditions.
pub trait ListFilters: DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static {
    fn conditions(&self) -> Vec<FilterWhereInfo>;
}

pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    type Create: CreateInput;
    type Update: UpdateInput;
    type Filters: ListFilters;

    /// Singular name used in logs and not-found errors.
    const NAME: &'static str;
    /// URL segment: `/{PATH}/v1`.
    const PATH: &'static str;
    /// Column holding the owning user's id, for resources scoped per caller.
    const OWNER_COLUMN: Option<&'static str> = None;

    fn schema() -> &'static TableSchema;
}

/// Equality filter on `title`; empty means no filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleFilter {
    #[serde(default)]
    pub title: String,
}

impl ListFilters for TitleFilter {
    fn conditions(&self) -> Vec<FilterWhereInfo> {
        if self.title.is_empty() {
            return Vec::new();
        }
        vec![FilterWhereInfo {
            column: "title".to_string(),
            data: self.title.clone().into(),
        }]
    }
}

/// Every table, in creation order.
pub fn all_schemas() -> Vec<&'static TableSchema> {
    vec![
        Todo::schema(),
        Organisation::schema(),
        Membership::schema(),
        Record::schema(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_filter_matches_everything() {
        assert!(TitleFilter::default().conditions().is_empty());
        let conditions = TitleFilter { title: "x".into() }.conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].column, "title");
    }

    #[test]
    fn schemas_are_distinct_tables() {
        let names: Vec<_> = all_schemas().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["todos", "organisations", "memberships", "records"]);
    }
}
