//! Configuration management for the authorization service
//!
//! This module handles loading, validation, and merging of the policy file.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::auth::rbac::ResolutionMode;
use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default policy file location
pub const DEFAULT_CONFIG_PATH: &str = "config/authz.yaml";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP decision service settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Resolution mode and presets
    #[serde(default)]
    pub rbac: RbacConfig,
    /// Roles, permissions and assignments
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Load configuration from a YAML file, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthzError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.apply_env()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AuthzError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `ABRO_AUTHZ_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = env::var("ABRO_AUTHZ_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("ABRO_AUTHZ_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| AuthzError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(token) = env::var("ABRO_AUTHZ_ADMIN_TOKEN") {
            self.server.admin_token = Some(token);
        }
        if let Ok(resolution) = env::var("ABRO_AUTHZ_RESOLUTION") {
            self.rbac.resolution = resolution.parse::<ResolutionMode>()?;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get RBAC configuration
    pub fn rbac(&self) -> &RbacConfig {
        &self.rbac
    }

    /// Get policy configuration
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| AuthzError::Config(format!("Server config error: {}", e)))?;

        self.policy
            .validate()
            .map_err(|e| AuthzError::Config(format!("Policy config error: {}", e)))?;

        if self.rbac.preset.is_none() && self.policy.is_empty() {
            warn!("No preset and no policy configured: every check will be denied");
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.rbac = self.rbac.merge(other.rbac);
        self.policy = self.policy.merge(other.policy);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AuthzError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
