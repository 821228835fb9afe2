// handlers/resource/create.rs - POST /{resource}/v1 handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::resources::Resource;
use crate::services::ResourceService;

pub async fn create<R: Resource>(
    State(service): State<ResourceService<R>>,
    caller: Caller,
    body: Result<Json<R::Create>, JsonRejection>,
) -> ApiResult<R> {
    let Json(options) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let created = service.create(caller, Some(options)).await?;
    Ok(ApiResponse::created(created))
}
