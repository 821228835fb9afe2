use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const DELETED_AT: &str = "deleted_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Uuid,
    Text,
    Timestamp,
}

impl ColumnKind {
    pub fn pg_type(&self) -> &'static str {
        match self {
            ColumnKind::Uuid => "uuid",
            ColumnKind::Text => "text",
            ColumnKind::Timestamp => "timestamptz",
        }
    }
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

impl Column {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind, nullable: false }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind, nullable: true }
    }
}

/// Static description of one resource table. Column names here are the only
/// identifiers ever spliced into SQL.
#[derive(Debug)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let mut def = format!("\"{}\" {}", c.name, c.kind.pg_type());
                if c.name == ID {
                    def.push_str(" PRIMARY KEY");
                } else if c.name == CREATED_AT || c.name == UPDATED_AT {
                    def.push_str(" NOT NULL DEFAULT now()");
                } else if !c.nullable {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS \"{}\" ({})", self.name, columns)
    }

    /// Indexes on foreign/owner uuid columns, which every scoped query filters on.
    pub fn create_index_sql(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Uuid && c.name != ID)
            .map(|c| {
                format!(
                    "CREATE INDEX IF NOT EXISTS \"{table}_{column}_idx\" ON \"{table}\" (\"{column}\")",
                    table = self.name,
                    column = c.name
                )
            })
            .collect()
    }
}

/// Declares a resource table: the shared base columns followed by `$column`s.
macro_rules! table_schema {
    ($name:expr, [$($column:expr),* $(,)?]) => {
        $crate::database::schema::TableSchema {
            name: $name,
            columns: &[
                $crate::database::schema::Column::required(
                    $crate::database::schema::ID,
                    $crate::database::schema::ColumnKind::Uuid,
                ),
                $crate::database::schema::Column::required(
                    $crate::database::schema::CREATED_AT,
                    $crate::database::schema::ColumnKind::Timestamp,
                ),
                $crate::database::schema::Column::required(
                    $crate::database::schema::UPDATED_AT,
                    $crate::database::schema::ColumnKind::Timestamp,
                ),
                $crate::database::schema::Column::optional(
                    $crate::database::schema::DELETED_AT,
                    $crate::database::schema::ColumnKind::Timestamp,
                ),
                $($column),*
            ],
        }
    };
}
pub(crate) use table_schema;

/// Create any missing resource tables. Safe to run on every startup.
pub async fn ensure_schema(pool: &PgPool, schemas: &[&TableSchema]) -> Result<(), DatabaseError> {
    for schema in schemas {
        sqlx::query(&schema.create_table_sql()).execute(pool).await?;
        for index in schema.create_index_sql() {
            sqlx::query(&index).execute(pool).await?;
        }
        info!("Ensured table: {}", schema.name);
    }
    Ok(())
}
