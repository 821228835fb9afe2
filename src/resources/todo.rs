use serde::{Deserialize, Serialize};

use super::options::require_title;
use super::{Base, CreateInput, Resource, ResourceError, TitleFilter, UpdateInput, Validate};
use crate::database::schema::{table_schema, Column, ColumnKind, TableSchema};

static SCHEMA: TableSchema = table_schema!("todos", [Column::required("title", ColumnKind::Text)]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(flatten)]
    pub base: Base,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOptions {
    #[serde(default)]
    pub title: String,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        require_title(&self.title)
    }
}

impl CreateInput for CreateOptions {}

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

impl Resource for Todo {
    type Create = CreateOptions;
    type Update = UpdateOptions;
    type Filters = TitleFilter;

    const NAME: &'static str = "todo";
    const PATH: &'static str = "todos";

    fn schema() -> &'static TableSchema {
        &SCHEMA
    }
}
