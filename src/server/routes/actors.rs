//! Admin endpoints: role assignment and actor inspection

use crate::server::middleware::AdminAuthMiddleware;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure admin routes, guarded by the admin bearer token
pub fn configure_routes(cfg: &mut web::ServiceConfig, admin_token: &str) {
    cfg.service(
        web::scope("/v1/actors")
            .wrap(AdminAuthMiddleware::new(admin_token))
            .service(
                web::resource("/{actor_id}/role")
                    .route(web::put().to(assign_role))
                    .route(web::delete().to(revoke_role)),
            )
            .route("/{actor_id}/permissions", web::get().to(actor_permissions)),
    );
}

/// Role assignment body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRoleRequest {
    pub role: String,
}

/// Current role and resolved permissions of one actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorPermissionsResponse {
    pub actor_id: String,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

/// `PUT /v1/actors/{actor_id}/role`
async fn assign_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<AssignRoleRequest>,
) -> Result<HttpResponse> {
    let actor_id = path.into_inner();
    state.engine.assign_role(&actor_id, &request.role)?;

    info!("Assigned role {} to actor {}", request.role, actor_id);
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /v1/actors/{actor_id}/role`
async fn revoke_role(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let actor_id = path.into_inner();
    if state.engine.revoke_role(&actor_id) {
        info!("Revoked role of actor {}", actor_id);
    }
    HttpResponse::NoContent().finish()
}

/// `GET /v1/actors/{actor_id}/permissions`
async fn actor_permissions(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let actor_id = path.into_inner();
    let response = ActorPermissionsResponse {
        role: state.engine.get_actor_role(&actor_id).map(String::from),
        permissions: state
            .engine
            .get_actor_permissions(&actor_id)
            .into_iter()
            .map(String::from)
            .collect(),
        actor_id,
    };

    HttpResponse::Ok().json(ApiResponse::success(response))
}
