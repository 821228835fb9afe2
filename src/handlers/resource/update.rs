// handlers/resource/update.rs - PATCH /{resource}/v1/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::resources::Resource;
use crate::services::ResourceService;

use super::parse_id;

pub async fn update<R: Resource>(
    State(service): State<ResourceService<R>>,
    caller: Caller,
    Path(id): Path<String>,
    body: Result<Json<R::Update>, JsonRejection>,
) -> ApiResult<R> {
    let id = parse_id(&id)?;
    let Json(options) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let updated = service.update(caller, id, Some(options)).await?;
    Ok(ApiResponse::success(updated))
}
