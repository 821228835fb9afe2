// handlers/public/mod.rs - Public handlers (no authentication required)

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::database::Store;
use crate::error::ApiError;
use crate::resources::all_schemas;

/// GET / - service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "resources": all_schemas().iter().map(|s| s.name).collect::<Vec<_>>(),
    }))
}

/// GET /health - 503 when the store does not answer
pub async fn health(State(store): State<Arc<dyn Store>>) -> Result<impl IntoResponse, ApiError> {
    store.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Store unavailable")
    })?;
    Ok(Json(json!({"status": "ok"})))
}
