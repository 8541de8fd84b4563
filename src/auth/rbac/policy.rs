//! Building an engine from a policy configuration

use crate::config::{Config, PolicyConfig, Preset, RbacConfig, RoleConfig};
use crate::utils::error::{AuthzError, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use super::system::AuthorizationEngine;
use super::types::{Permission, PermissionName, Role, RoleName};

impl AuthorizationEngine {
    /// Build an engine from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_policy(&config.policy, &config.rbac)
    }

    /// Build an engine from a policy and its RBAC settings.
    ///
    /// The preset (if any) is loaded first, then roles parents-first, then
    /// permissions, self-scoped resources and assignments. Any error aborts
    /// the whole load.
    pub fn from_policy(policy: &PolicyConfig, rbac: &RbacConfig) -> Result<Self> {
        let engine = Self::with_resolution(rbac.resolution);

        if let Some(Preset::Hr) = rbac.preset {
            engine.load_hr_defaults()?;
        }

        engine.load_policy(policy)?;

        info!(
            "Authorization policy loaded: {} roles, {} permissions, {} assignments",
            engine.role_count(),
            engine.permission_count(),
            engine.assignment_count()
        );
        Ok(engine)
    }

    /// Load a policy on top of whatever the engine already holds.
    ///
    /// Each entry is applied atomically, but a failure leaves the entries
    /// before it in place.
    pub fn load_policy(&self, policy: &PolicyConfig) -> Result<()> {
        self.register_in_dependency_order(&policy.roles)?;

        for entry in &policy.permissions {
            let name = PermissionName::new(entry.name.as_str())?;
            let allowed_roles = entry
                .roles
                .iter()
                .map(|role| RoleName::new(role.as_str()))
                .collect::<Result<BTreeSet<_>>>()?;

            let mut permission = Permission::new(name, allowed_roles);
            if let Some(description) = &entry.description {
                permission = permission.with_description(description.as_str());
            }
            self.define(permission)?;
        }

        for resource in &policy.self_scoped_resources {
            self.register_self_scoped_resource(resource);
        }

        for (actor, role) in &policy.assignments {
            self.assign_role(actor, role)?;
        }

        Ok(())
    }

    /// Register roles so that each parent precedes its children
    fn register_in_dependency_order(&self, roles: &[RoleConfig]) -> Result<()> {
        let mut pending: Vec<&RoleConfig> = roles.iter().collect();

        while !pending.is_empty() {
            let mut progressed = false;
            let mut waiting = Vec::with_capacity(pending.len());

            for entry in pending {
                let ready = match &entry.parent {
                    Some(parent) => self.role_exists(parent),
                    None => true,
                };

                if ready {
                    self.register(role_from_config(entry)?)?;
                    progressed = true;
                } else {
                    waiting.push(entry);
                }
            }

            if !progressed {
                return Err(unresolvable_parents(&waiting));
            }
            pending = waiting;
        }

        debug!("Registered {} configured roles", roles.len());
        Ok(())
    }
}

fn role_from_config(entry: &RoleConfig) -> Result<Role> {
    let mut role = Role::new(RoleName::new(entry.name.as_str())?, entry.level);
    if let Some(parent) = &entry.parent {
        role = role.with_parent(RoleName::new(parent.as_str())?);
    }
    if let Some(description) = &entry.description {
        role = role.with_description(description.as_str());
    }
    if entry.self_scoped {
        role = role.self_scoped();
    }
    Ok(role)
}

/// Explain why none of the `waiting` roles could be registered: either their
/// parents form a cycle among themselves or a parent is missing entirely.
fn unresolvable_parents(waiting: &[&RoleConfig]) -> AuthzError {
    // Every waiting role has a parent, otherwise it would have been registered.
    let parents: HashMap<&str, &str> = waiting
        .iter()
        .filter_map(|entry| Some((entry.name.as_str(), entry.parent.as_deref()?)))
        .collect();

    let Some(first) = waiting.first() else {
        return AuthzError::config("Role hierarchy could not be resolved");
    };

    let mut path = vec![first.name.as_str()];
    let mut current = first.name.as_str();

    while let Some(&parent) = parents.get(current) {
        if let Some(start) = path.iter().position(|name| *name == parent) {
            let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(parent.to_string());
            return AuthzError::CyclicHierarchy { path: cycle };
        }
        path.push(parent);
        current = parent;
    }

    // `current` is neither registered nor waiting.
    let child = path
        .len()
        .checked_sub(2)
        .map_or(first.name.as_str(), |index| path[index]);
    AuthzError::UnknownParent {
        role: child.to_string(),
        parent: current.to_string(),
    }
}
