//! Application state shared across HTTP handlers

use crate::auth::AuthorizationEngine;
use crate::config::Config;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Both fields are `Arc`s so cloning per worker is cheap; the engine is the
/// single shared registry every handler queries.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authorization engine
    pub engine: Arc<AuthorizationEngine>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, engine: AuthorizationEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }

    /// Build the engine described by `config` and wrap both
    pub fn from_config(config: Config) -> crate::utils::error::Result<Self> {
        let engine = AuthorizationEngine::from_config(&config)?;
        Ok(Self::new(config, engine))
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
