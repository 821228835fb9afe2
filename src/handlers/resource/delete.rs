// handlers/resource/delete.rs - DELETE /{resource}/v1/:id handler (soft delete)

use axum::extract::{Path, State};

use crate::auth::Caller;
use crate::middleware::{ApiResponse, ApiResult};
use crate::resources::Resource;
use crate::services::ResourceService;

use super::parse_id;

pub async fn delete<R: Resource>(
    State(service): State<ResourceService<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<()> {
    service.delete(caller, parse_id(&id)?).await?;
    Ok(ApiResponse::message(format!("{} deleted", R::NAME)))
}
