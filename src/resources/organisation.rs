use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::require_title;
use super::{Base, CreateInput, Resource, ResourceError, TitleFilter, UpdateInput, Validate};
use crate::database::schema::{table_schema, Column, ColumnKind, TableSchema};

static SCHEMA: TableSchema = table_schema!(
    "organisations",
    [
        Column::required("title", ColumnKind::Text),
        Column::required("owner_id", ColumnKind::Uuid),
    ]
);

/// An organisation, visible only to the user that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organisation {
    #[serde(flatten)]
    pub base: Base,
    pub title: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOptions {
    #[serde(default)]
    pub title: String,
    /// Never read from request bodies; stamped from the caller.
    #[serde(skip_deserializing)]
    pub owner_id: Uuid,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        require_title(&self.title)?;
        if self.owner_id.is_nil() {
            return Err(ResourceError::InvalidOwner);
        }
        Ok(())
    }
}

impl CreateInput for CreateOptions {
    fn assign_owner(&mut self, owner: Uuid) {
        self.owner_id = owner;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOptions {
    #[serde(default)]
    pub title: String,
}

impl Validate for UpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        require_title(&self.title)
    }
}

impl UpdateInput for UpdateOptions {}

impl Resource for Organisation {
    type Create = CreateOptions;
    type Update = UpdateOptions;
    type Filters = TitleFilter;

    const NAME: &'static str = "organisation";
    const PATH: &'static str = "organisations";
    const OWNER_COLUMN: Option<&'static str> = Some("owner_id");

    fn schema() -> &'static TableSchema {
        &SCHEMA
    }
}
