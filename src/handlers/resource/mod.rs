// handlers/resource/mod.rs - Generic CRUD handlers, instantiated once per resource

pub mod create; // POST   /{resource}/v1
pub mod delete; // DELETE /{resource}/v1/:id
pub mod get;    // GET    /{resource}/v1/:id
pub mod list;   // GET    /{resource}/v1
pub mod update; // PATCH  /{resource}/v1/:id

pub use create::create;
pub use delete::delete;
pub use get::get;
pub use list::list;
pub use update::update;

use uuid::Uuid;

use crate::error::ApiError;
use crate::resources::ResourceError;

/// Path ids that are not UUIDs are client errors, reported like a nil id.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ResourceError::InvalidId.into())
}
