//! HTTP response handling for errors

use super::types::AuthzError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for AuthzError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthzError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthzError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthzError::DuplicateRole(_) => StatusCode::CONFLICT,
            AuthzError::UnknownParent { .. }
            | AuthzError::CyclicHierarchy { .. }
            | AuthzError::UnknownRole(_)
            | AuthzError::InvalidName { .. }
            | AuthzError::Validation(_)
            | AuthzError::BadRequest(_)
            | AuthzError::Serialization(_) => StatusCode::BAD_REQUEST,
            AuthzError::Config(_)
            | AuthzError::Io(_)
            | AuthzError::Yaml(_)
            | AuthzError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            // Denials carry no detail: the caller must not learn whether the
            // permission is unknown, the role lacks it or ownership failed.
            AuthzError::Unauthorized(_) => ("UNAUTHORIZED", "unauthorized".to_string()),
            AuthzError::Forbidden(_) => ("FORBIDDEN", "forbidden".to_string()),
            AuthzError::DuplicateRole(_) => ("DUPLICATE_ROLE", self.to_string()),
            AuthzError::UnknownParent { .. } => ("UNKNOWN_PARENT", self.to_string()),
            AuthzError::CyclicHierarchy { .. } => ("CYCLIC_HIERARCHY", self.to_string()),
            AuthzError::UnknownRole(_) => ("UNKNOWN_ROLE", self.to_string()),
            AuthzError::InvalidName { .. } => ("INVALID_NAME", self.to_string()),
            AuthzError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            AuthzError::BadRequest(_) | AuthzError::Serialization(_) => {
                ("BAD_REQUEST", self.to_string())
            }
            AuthzError::Config(_)
            | AuthzError::Io(_)
            | AuthzError::Yaml(_)
            | AuthzError::Internal(_) => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
