//! Role management methods

use crate::utils::error::{AuthzError, Result};
use crate::utils::logging::SecurityLogger;

use super::system::AuthorizationEngine;
use super::types::{Role, RoleName, UNKNOWN_ROLE_LEVEL};

impl AuthorizationEngine {
    /// Register a role with an optional, already registered parent
    pub fn register_role(&self, name: &str, level: i32, parent: Option<&str>) -> Result<()> {
        let mut role = Role::new(RoleName::new(name)?, level);
        if let Some(parent) = parent {
            role = role.with_parent(RoleName::new(parent)?);
        }
        self.register(role)
    }

    /// Register a fully described role.
    ///
    /// Fails with `DuplicateRole`, `UnknownParent` or `CyclicHierarchy`; the
    /// registry is left untouched on failure.
    pub fn register(&self, role: Role) -> Result<()> {
        let mut state = self.state.write();

        if state.roles.contains_key(&role.name) {
            return Err(AuthzError::DuplicateRole(role.name.to_string()));
        }

        if let Some(parent) = &role.parent {
            if !state.roles.contains_key(parent) {
                return Err(AuthzError::UnknownParent {
                    role: role.name.to_string(),
                    parent: parent.to_string(),
                });
            }
            if let Some(path) = state.cycle_through(role.name.as_str(), parent.as_str()) {
                return Err(AuthzError::CyclicHierarchy { path });
            }
        }

        SecurityLogger::log_registry_change("register_role", role.name.as_str());
        state.roles.insert(role.name.clone(), role);
        // New roles carry no grants yet, so cached sets stay valid.
        Ok(())
    }

    /// Re-parent an existing role, or detach it with `None`
    pub fn set_role_parent(&self, name: &str, parent: Option<&str>) -> Result<()> {
        let mut state = self.state.write();

        if !state.roles.contains_key(name) {
            return Err(AuthzError::UnknownRole(name.to_string()));
        }

        let parent = match parent {
            Some(parent) => {
                let Some(existing) = state.roles.get(parent) else {
                    return Err(AuthzError::UnknownParent {
                        role: name.to_string(),
                        parent: parent.to_string(),
                    });
                };
                let parent = existing.name.clone();
                if let Some(path) = state.cycle_through(name, parent.as_str()) {
                    return Err(AuthzError::CyclicHierarchy { path });
                }
                Some(parent)
            }
            None => None,
        };

        if let Some(role) = state.roles.get_mut(name) {
            role.parent = parent;
        }
        self.invalidate_all();

        SecurityLogger::log_registry_change("set_role_parent", name);
        Ok(())
    }

    /// Tag or untag a role as self-service
    pub fn set_self_scoped(&self, name: &str, self_scoped: bool) -> Result<()> {
        let mut state = self.state.write();
        let role = state
            .roles
            .get_mut(name)
            .ok_or_else(|| AuthzError::UnknownRole(name.to_string()))?;
        role.self_scoped = self_scoped;

        SecurityLogger::log_registry_change("set_self_scoped", name);
        Ok(())
    }

    /// Get role by name
    pub fn get_role(&self, name: &str) -> Option<Role> {
        self.state.read().roles.get(name).cloned()
    }

    /// Whether a role with this name is registered
    pub fn role_exists(&self, name: &str) -> bool {
        self.state.read().roles.contains_key(name)
    }

    /// List all roles, most senior first
    pub fn list_roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.state.read().roles.values().cloned().collect();
        roles.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.name.cmp(&b.name)));
        roles
    }

    /// `[role, parent, grandparent, ...]` up to the root.
    ///
    /// Empty when the role is not registered.
    pub fn get_role_hierarchy(&self, name: &str) -> Vec<RoleName> {
        self.state.read().ancestry(name)
    }

    /// Registered level, or `-1` for an unknown role
    pub fn get_role_level(&self, name: &str) -> i32 {
        self.state
            .read()
            .roles
            .get(name)
            .map_or(UNKNOWN_ROLE_LEVEL, |role| role.level)
    }

    /// Whether `role_a` ranks strictly above `role_b`
    pub fn is_role_senior(&self, role_a: &str, role_b: &str) -> bool {
        let state = self.state.read();
        let level = |name: &str| {
            state
                .roles
                .get(name)
                .map_or(UNKNOWN_ROLE_LEVEL, |role| role.level)
        };
        level(role_a) > level(role_b)
    }
}
