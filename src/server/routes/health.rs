//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub git_hash: Cow<'static, str>,
    /// Registry size, handy when checking that a policy file loaded
    pub roles: usize,
    pub permissions: usize,
    pub assignments: usize,
}

/// Basic health check endpoint
///
/// Returns the service status along with the size of the loaded registry.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        roles: state.engine.role_count(),
        permissions: state.engine.permission_count(),
        assignments: state.engine.assignment_count(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}
