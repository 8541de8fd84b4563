//! Policy definitions loaded into the engine at startup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role entry of a policy file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    pub level: i32,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub self_scoped: bool,
}

/// Permission entry of a policy file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionConfig {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Roles, permissions and assignments to load at startup.
///
/// Roles may appear in any order; they are registered parents first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
    #[serde(default)]
    pub permissions: Vec<PermissionConfig>,
    #[serde(default)]
    pub self_scoped_resources: Vec<String>,
    /// Actor id to role name
    #[serde(default)]
    pub assignments: BTreeMap<String, String>,
}

impl PolicyConfig {
    /// Merge policies: entries from `other` are appended, and its
    /// assignments replace ours for the same actor
    pub fn merge(mut self, other: Self) -> Self {
        self.roles.extend(other.roles);
        self.permissions.extend(other.permissions);
        for resource in other.self_scoped_resources {
            if !self.self_scoped_resources.contains(&resource) {
                self.self_scoped_resources.push(resource);
            }
        }
        self.assignments.extend(other.assignments);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
            && self.permissions.is_empty()
            && self.self_scoped_resources.is_empty()
            && self.assignments.is_empty()
    }
}
