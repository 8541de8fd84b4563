//! Server configuration validators

use super::trait_def::Validate;
use crate::config::models::ServerConfig;
use tracing::debug;

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Number of workers must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Number of workers should not exceed 1000".to_string());
            }
        }

        if self.max_body_size == 0 {
            return Err("Maximum body size must be greater than 0".to_string());
        }

        if self.admin_api && self.admin_token().is_none() {
            return Err("Admin API requires a non-empty admin_token".to_string());
        }

        Ok(())
    }
}
