//! HTTP middleware

mod auth;

pub use auth::{AuthMiddleware, get_auth_context};
