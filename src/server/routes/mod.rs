//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod actors;
pub mod authz;
pub mod health;

use actix_web::web;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Register every route. Admin endpoints are mounted only when a token guards them.
pub fn configure_routes(cfg: &mut web::ServiceConfig, admin_token: Option<&str>) {
    health::configure_routes(cfg);
    authz::configure_routes(cfg);
    if let Some(token) = admin_token {
        actors::configure_routes(cfg, token);
    }
}
