pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthState};
pub use response::{ApiResponse, ApiResult};
