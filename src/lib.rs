//! # abro-authz
//!
//! Role-based authorization for the AbrO HR attendance platform.
//!
//! ## Features
//!
//! - **Role hierarchy**: single-parent role tree with seniority levels
//! - **Explicit grants**: permissions name the roles that hold them
//! - **Ownership narrowing**: self-service roles only reach their own records
//! - **Decision service**: HTTP endpoints for collaborating services
//!
//! ## Quick Start
//!
//! ```rust
//! use abro_authz::AuthorizationEngine;
//!
//! let engine = AuthorizationEngine::with_hr_defaults().unwrap();
//! engine.assign_role("u1", "EMPLOYEE").unwrap();
//!
//! assert!(engine.can_access_resource("u1", "employee", "u1", "view_profile"));
//! assert!(!engine.can_access_resource("u1", "employee", "u2", "view_profile"));
//! assert!(!engine.can_approve_leave("u1"));
//! ```
//!
//! ## Service Mode
//!
//! ```rust,no_run
//! use abro_authz::{AuthzService, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/authz.yaml").await?;
//!     let service = AuthzService::new(config)?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod utils;

// Re-export main types
pub use auth::rbac::{
    ActorId, AuthorizationEngine, Decision, DecisionReason, Permission, PermissionName,
    ResolutionMode, Role, RoleName,
};
pub use config::Config;
pub use utils::error::{AuthzError, Result};

use tracing::info;

/// The decision service: a loaded policy behind the HTTP server
pub struct AuthzService {
    server: server::HttpServer,
}

impl AuthzService {
    /// Build the engine described by `config` and prepare the server
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating authorization service");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { server })
    }

    /// Shared engine, for embedding hosts that also query in-process
    pub fn engine(&self) -> std::sync::Arc<AuthorizationEngine> {
        std::sync::Arc::clone(&self.server.state().engine)
    }

    /// Run the decision service until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting AbrO authorization service");
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Service build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

/// Build information baked in at compile time
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    }
}
