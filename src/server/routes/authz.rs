//! Decision endpoints
//!
//! Every denial is answered with the same bare `403 forbidden`; the internal
//! reason only reaches the security log.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{AuthzError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Configure decision routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/authorize", web::post().to(authorize))
        .route("/v1/permissions/check", web::post().to(check_permissions))
        .route("/v1/permissions/modules", web::get().to(permission_modules))
        .route("/v1/roles/{role}/hierarchy", web::get().to(role_hierarchy));
}

/// Resource access query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    pub actor_id: String,
    pub resource_type: String,
    pub resource_id: String,
    pub action: String,
}

/// How a permission list combines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    Any,
    #[default]
    All,
}

/// Permission list query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckRequest {
    pub actor_id: String,
    pub permissions: Vec<String>,
    #[serde(default)]
    pub mode: CheckMode,
}

/// Positive decision body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    pub allowed: bool,
}

/// Ancestry of one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleHierarchyResponse {
    pub role: String,
    pub level: i32,
    pub hierarchy: Vec<String>,
}

fn allowed() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(AuthorizeResponse { allowed: true }))
}

/// `POST /v1/authorize`
async fn authorize(
    state: web::Data<AppState>,
    request: web::Json<AuthorizeRequest>,
) -> Result<HttpResponse> {
    let decision = state.engine.check_resource_detailed(
        &request.actor_id,
        &request.resource_type,
        &request.resource_id,
        &request.action,
    );

    if decision.granted {
        Ok(allowed())
    } else {
        Err(AuthzError::forbidden(decision.reason.as_str()))
    }
}

/// `POST /v1/permissions/check`
async fn check_permissions(
    state: web::Data<AppState>,
    request: web::Json<PermissionCheckRequest>,
) -> Result<HttpResponse> {
    let granted = match request.mode {
        CheckMode::Any => state
            .engine
            .has_any_permission(&request.actor_id, request.permissions.as_slice()),
        CheckMode::All => state
            .engine
            .has_all_permissions(&request.actor_id, request.permissions.as_slice()),
    };

    if granted {
        Ok(allowed())
    } else {
        Err(AuthzError::forbidden(format!(
            "{:?} check failed",
            request.mode
        )))
    }
}

/// `GET /v1/roles/{role}/hierarchy`
async fn role_hierarchy(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let role = path.into_inner();
    debug!("Hierarchy requested for role {}", role);

    let response = RoleHierarchyResponse {
        level: state.engine.get_role_level(&role),
        hierarchy: state
            .engine
            .get_role_hierarchy(&role)
            .into_iter()
            .map(String::from)
            .collect(),
        role,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// `GET /v1/permissions/modules`
async fn permission_modules(state: web::Data<AppState>) -> Result<HttpResponse> {
    let modules: BTreeMap<String, Vec<String>> = state.engine.get_permissions_by_module();
    Ok(HttpResponse::Ok().json(ApiResponse::success(modules)))
}
