use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::auth::{JwtError, JwtKeys};
use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{self, resource_routes};
use crate::middleware::AuthState;
use crate::resources::{Membership, Organisation, Record, Resource, Todo};
use crate::services::ResourceService;

/// Build the full router over `store`.
///
/// Fails only when no JWT secret is configured.
pub fn app(store: Arc<dyn Store>, config: &AppConfig) -> Result<Router, JwtError> {
    let auth = AuthState {
        keys: JwtKeys::from_config(&config.security)?,
        allow_anonymous: config.security.allow_anonymous,
    };
    if auth.allow_anonymous {
        tracing::warn!("Anonymous access enabled: requests without a token run unscoped");
    }

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health).with_state(store.clone()))
        // Resources
        .merge(versioned::<Todo>(&store, &auth))
        .merge(versioned::<Organisation>(&store, &auth))
        .merge(versioned::<Membership>(&store, &auth))
        .merge(versioned::<Record>(&store, &auth))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    Ok(router)
}

fn versioned<R: Resource>(store: &Arc<dyn Store>, auth: &AuthState) -> Router {
    let service = ResourceService::<R>::with_store(store.clone());
    Router::new().nest(&format!("/{}/v1", R::PATH), resource_routes(service, auth.clone()))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}
