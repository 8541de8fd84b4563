//! Helper methods for RBAC operations

use super::system::Registry;
use super::types::{Permission, ResolutionMode, RoleName};

impl Registry {
    /// `[role, parent, grandparent, ...]`, empty when `role` is unknown.
    ///
    /// Bounded by the number of roles, so a corrupted chain cannot spin.
    pub(super) fn ancestry(&self, role: &str) -> Vec<RoleName> {
        let mut chain = Vec::new();
        let mut current = self.roles.get(role);

        while let Some(entry) = current {
            if chain.len() > self.roles.len() {
                break;
            }
            chain.push(entry.name.clone());
            current = entry
                .parent
                .as_ref()
                .and_then(|parent| self.roles.get(parent.as_str()));
        }

        chain
    }

    /// Whether `ancestor` appears in the parent chain of `role` (or is `role`).
    pub(super) fn is_self_or_ancestor(&self, ancestor: &str, role: &str) -> bool {
        self.ancestry(role)
            .iter()
            .any(|name| name.as_str() == ancestor)
    }

    /// Whether `role` holds `permission` under the current resolution mode
    pub(super) fn role_holds(&self, role: &RoleName, permission: &Permission) -> bool {
        if permission.allowed_roles.contains(role) {
            return true;
        }

        match self.resolution {
            ResolutionMode::Direct => false,
            ResolutionMode::Inherited => permission
                .allowed_roles
                .iter()
                .any(|granted| self.is_self_or_ancestor(role.as_str(), granted.as_str())),
        }
    }

    /// Cycle that attaching `parent` to `role` would close, if any.
    ///
    /// Returns the offending path `role -> parent -> ... -> role`.
    pub(super) fn cycle_through(&self, role: &str, parent: &str) -> Option<Vec<String>> {
        let mut path = vec![role.to_string()];
        for name in self.ancestry(parent) {
            path.push(name.to_string());
            if name.as_str() == role {
                return Some(path);
            }
        }

        None
    }
}
