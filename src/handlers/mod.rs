// handlers/mod.rs - HTTP surface
//
// Public routes (`/`, `/health`) need no token. Every resource route goes
// through the JWT middleware, which resolves the Caller the handlers pass on.

pub mod public;
pub mod resource;

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};

use crate::middleware::{jwt_auth_middleware, AuthState};
use crate::resources::Resource;
use crate::services::ResourceService;

/// `/{R::PATH}/v1` and `/{R::PATH}/v1/:id`, bound to `service`.
pub fn resource_routes<R: Resource>(service: ResourceService<R>, auth: AuthState) -> Router {
    Router::new()
        .route("/", get(resource::list::<R>).post(resource::create::<R>))
        .route(
            "/:id",
            get(resource::get::<R>)
                .patch(resource::update::<R>)
                .delete(resource::delete::<R>),
        )
        .route_layer(from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(service)
}
