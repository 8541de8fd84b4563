//! Policy validators

use super::trait_def::Validate;
use crate::config::models::PolicyConfig;
use std::collections::HashSet;
use tracing::debug;

impl Validate for PolicyConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating policy configuration");

        let mut role_names = HashSet::new();
        for role in &self.roles {
            if role.name.trim().is_empty() {
                return Err("Role name cannot be empty".to_string());
            }
            if !role_names.insert(role.name.as_str()) {
                return Err(format!("Role '{}' is defined more than once", role.name));
            }
            if role.parent.as_deref() == Some(role.name.as_str()) {
                return Err(format!("Role '{}' cannot be its own parent", role.name));
            }
        }

        let mut permission_names = HashSet::new();
        for permission in &self.permissions {
            if permission.name.trim().is_empty() {
                return Err("Permission name cannot be empty".to_string());
            }
            if !permission_names.insert(permission.name.as_str()) {
                return Err(format!(
                    "Permission '{}' is defined more than once",
                    permission.name
                ));
            }
        }

        if self
            .self_scoped_resources
            .iter()
            .any(|resource| resource.trim().is_empty())
        {
            return Err("Self-scoped resource types cannot be empty".to_string());
        }

        if let Some((actor, _)) = self
            .assignments
            .iter()
            .find(|(actor, role)| actor.trim().is_empty() || role.trim().is_empty())
        {
            return Err(format!("Invalid assignment for actor '{}'", actor));
        }

        Ok(())
    }
}
