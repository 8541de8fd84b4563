//! Helper functions for creating specific error types

use super::types::AuthzError;

/// Helper functions for creating specific errors
impl AuthzError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden<S: Into<String>>(reason: S) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn unauthorized<S: Into<String>>(reason: S) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error came from a rejected registry mutation
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRole(_)
                | Self::UnknownParent { .. }
                | Self::CyclicHierarchy { .. }
                | Self::UnknownRole(_)
                | Self::InvalidName { .. }
        )
    }
}
