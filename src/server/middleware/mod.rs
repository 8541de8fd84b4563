//! HTTP middleware implementations
//!
//! - Bearer-token authentication for the admin endpoints

mod auth;
mod helpers;

pub use auth::{AdminAuthMiddleware, AdminAuthMiddlewareService};
pub use helpers::{constant_time_eq, extract_bearer_token};
