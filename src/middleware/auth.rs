use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{Caller, JwtKeys};
use crate::error::ApiError;

/// What the auth middleware needs from application state.
#[derive(Clone)]
pub struct AuthState {
    pub keys: JwtKeys,
    /// Treat requests without an Authorization header as `Caller::Internal`.
    pub allow_anonymous: bool,
}

/// JWT authentication middleware that resolves the [`Caller`] for the request.
///
/// A present but invalid token is always rejected, even when anonymous
/// access is allowed.
pub async fn jwt_auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = match extract_jwt_from_headers(request.headers()) {
        Ok(Some(token)) => match auth.keys.validate(&token) {
            Ok(claims) => Caller::from(claims),
            Err(e) => return ApiError::unauthorized(e.to_string()).into_response(),
        },
        Ok(None) if auth.allow_anonymous => {
            tracing::debug!("No Authorization header, continuing as internal caller");
            Caller::Internal
        }
        Ok(None) => return ApiError::unauthorized("Missing Authorization header").into_response(),
        Err(msg) => return ApiError::unauthorized(msg).into_response(),
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

/// Extract JWT token from Authorization header. `Ok(None)` when the header is absent.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if token.trim().is_empty() => Err("Empty JWT token".to_string()),
        Some(token) => Ok(Some(token.trim().to_string())),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Caller>().copied().ok_or_else(|| {
            tracing::error!("Caller missing from request extensions; auth middleware not applied");
            ApiError::internal_server_error("Authentication context unavailable")
        })
    }
}
