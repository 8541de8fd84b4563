//! Admin authentication middleware

use crate::server::middleware::helpers::{constant_time_eq, extract_bearer_token};
use crate::utils::error::AuthzError;
use crate::utils::logging::SecurityLogger;
use actix_web::ResponseError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Rejects requests that do not carry the configured admin bearer token
pub struct AdminAuthMiddleware {
    token: Arc<str>,
}

impl AdminAuthMiddleware {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::from(token),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AdminAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddlewareService {
            service,
            token: self.token.clone(),
        }))
    }
}

/// Service implementation for admin auth middleware
pub struct AdminAuthMiddlewareService<S> {
    service: S,
    token: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorized = extract_bearer_token(req.headers())
            .is_some_and(|token| constant_time_eq(token, &self.token));

        if !authorized {
            let peer = req.connection_info().peer_addr().map(str::to_string);
            SecurityLogger::log_admin_auth_failure(req.path(), peer.as_deref());

            let response = AuthzError::unauthorized("missing or invalid admin token")
                .error_response()
                .map_into_right_body();
            return Box::pin(async move { Ok(req.into_response(response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
