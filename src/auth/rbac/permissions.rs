//! Permission registry and checking methods

use crate::utils::error::{AuthzError, Result};
use crate::utils::logging::SecurityLogger;
use std::collections::{BTreeMap, BTreeSet};

use super::system::{AuthorizationEngine, Registry};
use super::types::{Decision, DecisionReason, Permission, PermissionName, RoleName};

impl AuthorizationEngine {
    /// Define (or overwrite) a permission granted to `allowed_roles`.
    ///
    /// Every listed role must already be registered.
    pub fn define_permission<I, S>(&self, name: &str, allowed_roles: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = PermissionName::new(name)?;
        let allowed_roles = allowed_roles
            .into_iter()
            .map(|role| RoleName::new(role.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;

        self.define(Permission::new(name, allowed_roles))
    }

    /// Define a fully described permission
    pub fn define(&self, permission: Permission) -> Result<()> {
        let mut state = self.state.write();

        if let Some(unknown) = permission
            .allowed_roles
            .iter()
            .find(|role| !state.roles.contains_key(*role))
        {
            return Err(AuthzError::UnknownRole(unknown.to_string()));
        }

        SecurityLogger::log_registry_change("define_permission", permission.name.as_str());
        state.permissions.insert(permission.name.clone(), permission);
        self.invalidate_all();
        Ok(())
    }

    /// Add custom permission. Same contract as [`Self::define_permission`].
    pub fn add_permission<I, S>(&self, name: &str, allowed_roles: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.define_permission(name, allowed_roles)
    }

    /// Remove a permission. Removing an unknown permission is a no-op.
    ///
    /// Returns whether a permission was actually removed.
    pub fn remove_permission(&self, name: &str) -> bool {
        let mut state = self.state.write();
        let removed = state.permissions.remove(name).is_some();
        if removed {
            self.invalidate_all();
            SecurityLogger::log_registry_change("remove_permission", name);
        }
        removed
    }

    /// Get permission by name
    pub fn get_permission(&self, name: &str) -> Option<Permission> {
        self.state.read().permissions.get(name).cloned()
    }

    /// List all permissions, sorted by name
    pub fn list_permissions(&self) -> Vec<Permission> {
        let mut permissions: Vec<Permission> =
            self.state.read().permissions.values().cloned().collect();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        permissions
    }

    /// Whether `actor` holds `permission`.
    ///
    /// Never fails: no assigned role or an undefined permission is `false`.
    pub fn has_permission(&self, actor: &str, permission: &str) -> bool {
        self.check_permission_detailed(actor, permission).granted
    }

    /// Whether `actor` holds at least one of `permissions`
    pub fn has_any_permission<S: AsRef<str>>(&self, actor: &str, permissions: &[S]) -> bool {
        let state = self.state.read();
        permissions.iter().any(|permission| {
            let decision = self.evaluate_permission(&state, actor, permission.as_ref());
            SecurityLogger::log_authz_event(actor, permission.as_ref(), None, &decision);
            decision.granted
        })
    }

    /// Whether `actor` holds every one of `permissions`
    pub fn has_all_permissions<S: AsRef<str>>(&self, actor: &str, permissions: &[S]) -> bool {
        let state = self.state.read();
        permissions.iter().all(|permission| {
            let decision = self.evaluate_permission(&state, actor, permission.as_ref());
            SecurityLogger::log_authz_event(actor, permission.as_ref(), None, &decision);
            decision.granted
        })
    }

    /// Permission check with the internal reason attached
    pub fn check_permission_detailed(&self, actor: &str, permission: &str) -> Decision {
        let state = self.state.read();
        let decision = self.evaluate_permission(&state, actor, permission);
        SecurityLogger::log_authz_event(actor, permission, None, &decision);
        decision
    }

    /// Evaluate without logging. Caller holds the read lock.
    pub(super) fn evaluate_permission(
        &self,
        state: &Registry,
        actor: &str,
        permission: &str,
    ) -> Decision {
        let Some(role) = state.assignments.get(actor) else {
            return Decision::deny(DecisionReason::NoRoleAssigned, None);
        };

        if !state.permissions.contains_key(permission) {
            return Decision::deny(DecisionReason::UnknownPermission, Some(role.clone()));
        }

        let granted = self
            .resolved_permissions(state, actor)
            .is_some_and(|resolved| resolved.contains(permission));

        if granted {
            Decision::grant(role.clone())
        } else {
            Decision::deny(DecisionReason::RoleNotGranted, Some(role.clone()))
        }
    }

    /// All permissions `actor` currently holds, sorted
    pub fn get_actor_permissions(&self, actor: &str) -> Vec<PermissionName> {
        let state = self.state.read();
        let mut permissions: Vec<PermissionName> = self
            .resolved_permissions(&state, actor)
            .map(|resolved| resolved.iter().cloned().collect())
            .unwrap_or_default();
        permissions.sort();
        permissions
    }

    /// Roles that hold `permission` under the current resolution mode
    pub fn roles_granted(&self, permission: &str) -> Vec<RoleName> {
        let state = self.state.read();
        let Some(permission) = state.permissions.get(permission) else {
            return Vec::new();
        };

        let mut roles: Vec<RoleName> = state
            .roles
            .keys()
            .filter(|role| state.role_holds(role, permission))
            .cloned()
            .collect();
        roles.sort();
        roles
    }

    /// Actions grouped by their leading module (`employee` -> `[view_profile, ...]`)
    ///
    /// The action is everything after the first dot, so `employee.profile.view`
    /// lists as `profile.view` under `employee` rather than being truncated to
    /// `profile`.
    pub fn get_permissions_by_module(&self) -> BTreeMap<String, Vec<String>> {
        let state = self.state.read();
        let mut modules: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for name in state.permissions.keys() {
            let action = name
                .as_str()
                .split_once('.')
                .map_or("", |(_, action)| action);
            modules
                .entry(name.module().to_string())
                .or_default()
                .push(action.to_string());
        }

        for actions in modules.values_mut() {
            actions.sort();
        }
        modules
    }
}
