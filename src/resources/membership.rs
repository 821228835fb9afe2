use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Base, CreateInput, ListFilters, Resource, ResourceError, UpdateInput, Validate};
use crate::database::schema::{table_schema, Column, ColumnKind, TableSchema};
use crate::filter::FilterWhereInfo;

static SCHEMA: TableSchema = table_schema!(
    "memberships",
    [
        Column::required("user_id", ColumnKind::Uuid),
        Column::required("org_id", ColumnKind::Uuid),
        Column::required("relation", ColumnKind::Text),
    ]
);

/// A user's role within an organisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Owner,
    Admin,
    Editor,
    Viewer,
    #[default]
    Member,
}

/// Links a user to an organisation. Memberships are not owner-scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(flatten)]
    pub base: Base,
    pub user_id: Uuid,
    pub org_id: Uuid,
    pub relation: Relation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOptions {
    #[serde(default)]
    pub user_id: Uuid,
    #[serde(default)]
    pub org_id: Uuid,
    #[serde(default)]
    pub relation: Relation,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        if self.user_id.is_nil() {
            return Err(ResourceError::InvalidReference("user_id"));
        }
        if self.org_id.is_nil() {
            return Err(ResourceError::InvalidReference("org_id"));
        }
        Ok(())
    }
}

impl CreateInput for CreateOptions {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOptions {
    /// Required: an update body without it is rejected rather than resetting the role.
    pub relation: Relation,
}

// Relation is a closed enum, so anything that deserialized is valid.
impl Validate for UpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        Ok(())
    }
}

impl UpdateInput for UpdateOptions {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub org_id: Option<Uuid>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl ListFilters for Filters {
    fn conditions(&self) -> Vec<FilterWhereInfo> {
        [("org_id", self.org_id), ("user_id", self.user_id)]
            .into_iter()
            .filter_map(|(column, id)| {
                id.map(|id| FilterWhereInfo {
                    column: column.to_string(),
                    data: id.to_string().into(),
                })
            })
            .collect()
    }
}

impl Resource for Membership {
    type Create = CreateOptions;
    type Update = UpdateOptions;
    type Filters = Filters;

    const NAME: &'static str = "membership";
    const PATH: &'static str = "memberships";

    fn schema() -> &'static TableSchema {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_references_are_named() {
        let missing_user = CreateOptions { org_id: Uuid::new_v4(), ..Default::default() };
        assert!(matches!(missing_user.validate(), Err(ResourceError::InvalidReference("user_id"))));

        let missing_org = CreateOptions { user_id: Uuid::new_v4(), ..Default::default() };
        assert!(matches!(missing_org.validate(), Err(ResourceError::InvalidReference("org_id"))));
    }

    #[test]
    fn relation_defaults_to_member() {
        let parsed: CreateOptions = serde_json::from_str(&format!(
            r#"{{"user_id":"{}","org_id":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();
        assert_eq!(parsed.relation, Relation::Member);
        assert_eq!(serde_json::to_value(Relation::Admin).unwrap(), "admin");
    }

    #[test]
    fn update_requires_relation() {
        assert!(serde_json::from_str::<UpdateOptions>("{}").is_err());
        let parsed: UpdateOptions = serde_json::from_str(r#"{"relation":"owner"}"#).unwrap();
        assert_eq!(parsed.relation, Relation::Owner);
    }

    #[test]
    fn filters_only_set_ids() {
        let org = Uuid::new_v4();
        let conditions = Filters { org_id: Some(org), user_id: None }.conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].column, "org_id");
        assert_eq!(conditions[0].data, serde_json::json!(org.to_string()));
    }
}
