//! Decision service integration tests
//!
//! Drive the actix application in-process with `actix_web::test`.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{HR_ADMIN_TOKEN, HR_POLICY_YAML};
    use abro_authz::Config;
    use abro_authz::server::routes::ApiResponse;
    use abro_authz::server::routes::authz::AuthorizeResponse;
    use abro_authz::server::{AppState, HttpServer};
    use abro_authz::utils::error::ErrorResponse;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::json;

    fn hr_state() -> AppState {
        let config = Config::from_yaml_str(HR_POLICY_YAML).unwrap();
        AppState::from_config(config).unwrap()
    }

    fn authorize(
        actor: &str,
        resource_type: &str,
        resource_id: &str,
        action: &str,
    ) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/v1/authorize")
            .set_json(json!({
                "actor_id": actor,
                "resource_type": resource_type,
                "resource_id": resource_id,
                "action": action,
            }))
    }

    #[actix_web::test]
    async fn test_leave_approval_workflow() {
        let state = hr_state();
        let engine = state.engine.clone();
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        // An employee files leave for themselves
        let req = authorize("e1", "employee", "e1", "request_leave").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // ...but may not approve it
        let req = authorize("e1", "hr", "e1", "approve_leave").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // HR approves
        let req = authorize("hr1", "hr", "e1", "approve_leave").to_request();
        let body: ApiResponse<AuthorizeResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(body.data.unwrap().allowed);

        // Promotion over HTTP is visible to in-process callers
        let req = test::TestRequest::put()
            .uri("/v1/actors/e1/role")
            .insert_header(("Authorization", format!("Bearer {}", HR_ADMIN_TOKEN)))
            .set_json(json!({ "role": "HR_MANAGER" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
        assert!(engine.can_approve_leave("e1"));

        let req = authorize("e1", "hr", "e2", "approve_leave").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_forbidden_body_is_constant() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(hr_state()))).await;

        let mut bodies = Vec::new();
        for req in [
            authorize("e1", "employee.profile", "e2", "view").to_request(),
            authorize("c1", "employee", "c1", "view_profile").to_request(),
            authorize("nobody", "employee", "nobody", "view_profile").to_request(),
            authorize("root", "payroll", "x", "undefined").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
            let body: ErrorResponse = test::read_body_json(resp).await;
            bodies.push((body.error.code, body.error.message));
        }

        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(bodies[0].1, "forbidden");
    }

    #[actix_web::test]
    async fn test_empty_permission_lists() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(hr_state()))).await;

        let req = test::TestRequest::post()
            .uri("/v1/permissions/check")
            .set_json(json!({ "actor_id": "e1", "permissions": [], "mode": "all" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/v1/permissions/check")
            .set_json(json!({ "actor_id": "e1", "permissions": [], "mode": "any" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_unauthenticated_promotion_is_rejected() {
        let state = hr_state();
        let engine = state.engine.clone();
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::put()
            .uri("/v1/actors/e1/role")
            .set_json(json!({ "role": "SUPER_ADMIN" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        assert_eq!(
            engine.get_actor_role("e1").map(String::from).as_deref(),
            Some("EMPLOYEE")
        );
        let req = authorize("e1", "system", "x", "configure_auth").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_revoke_is_idempotent() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(hr_state()))).await;

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri("/v1/actors/hr1/role")
                .insert_header(("Authorization", format!("Bearer {}", HR_ADMIN_TOKEN)))
                .to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::NO_CONTENT
            );
        }

        let req = authorize("hr1", "hr", "e1", "approve_leave").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
