use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::require_title;
use super::{Base, CreateInput, Resource, ResourceError, TitleFilter, UpdateInput, Validate};
use crate::database::schema::{table_schema, Column, ColumnKind, TableSchema};

static SCHEMA: TableSchema = table_schema!(
    "records",
    [
        Column::required("title", ColumnKind::Text),
        Column::required("user_id", ColumnKind::Uuid),
    ]
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub base: Base,
    pub title: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOptions {
    #[serde(default)]
    pub title: String,
    #[serde(skip_deserializing)]
    pub user_id: Uuid,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        require_title(&self.title)?;
        if self.user_id.is_nil() {
            return Err(ResourceError::InvalidOwner);
        }
        Ok(())
    }
}

impl CreateInput for CreateOptions {
    fn assign_owner(&mut self, owner: Uuid) {
        self.user_id = owner;
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

impl Resource for Record {
    type Create = CreateOptions;
    type Update = UpdateOptions;
    type Filters = TitleFilter;

    const NAME: &'static str = "record";
    const PATH: &'static str = "records";
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");

    fn schema() -> &'static TableSchema {
        &SCHEMA
    }
}
