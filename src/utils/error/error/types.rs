//! Error types for the authorization engine

use thiserror::Error;

/// Result type alias for the authorization engine
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Main error type for the authorization engine
///
/// The first five variants are registry configuration errors. They are only
/// produced by mutating calls and always leave the registry untouched.
/// Query operations never return an error.
#[derive(Error, Debug)]
pub enum AuthzError {
    /// A role with the same name is already registered
    #[error("Duplicate role: {0}")]
    DuplicateRole(String),

    /// The requested parent role is not registered
    #[error("Unknown parent role '{parent}' for role '{role}'")]
    UnknownParent { role: String, parent: String },

    /// Attaching the parent would make the role its own ancestor
    #[error("Cyclic role hierarchy: {}", .path.join(" -> "))]
    CyclicHierarchy { path: Vec<String> },

    /// A referenced role is not registered
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// An identifier failed validation
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: &'static str,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or invalid admin credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Access denied. The reason is kept for logs and never rendered.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
