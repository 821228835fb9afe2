// handlers/resource/get.rs - GET /{resource}/v1/:id handler

use axum::extract::{Path, State};

use crate::auth::Caller;
use crate::middleware::{ApiResponse, ApiResult};
use crate::resources::Resource;
use crate::services::ResourceService;

use super::parse_id;

pub async fn get<R: Resource>(
    State(service): State<ResourceService<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<R> {
    let entity = service.get(caller, parse_id(&id)?).await?;
    Ok(ApiResponse::success(entity))
}
