//! RBAC type definitions

use crate::utils::error::{AuthzError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Level reported for roles that are not registered
pub const UNKNOWN_ROLE_LEVEL: i32 = -1;

static ROLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("Invalid role name regex"));

static PERMISSION_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)+$").expect("Invalid permission name regex")
});

/// Validated role identifier (e.g. `HR_MANAGER`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Validate and wrap a role name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AuthzError::InvalidName {
                kind: "role",
                name,
                reason: "must not be empty",
            });
        }
        if !ROLE_NAME_RE.is_match(&name) {
            return Err(AuthzError::InvalidName {
                kind: "role",
                name,
                reason: "only letters, digits, '_' and '-' are allowed",
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated permission identifier in `resourceType.action` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(String);

impl PermissionName {
    /// Validate and wrap a permission name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !PERMISSION_NAME_RE.is_match(&name) {
            return Err(AuthzError::InvalidName {
                kind: "permission",
                name,
                reason: "expected dot-separated 'resource.action' segments",
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last dot (`employee.profile` in `employee.profile.view`)
    pub fn resource(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(resource, _)| resource)
    }

    /// The last segment (`view` in `employee.profile.view`)
    pub fn action(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(_, action)| action)
    }

    /// First segment, used to group permissions by module
    pub fn module(&self) -> &str {
        self.0.split_once('.').map_or("", |(module, _)| module)
    }
}

/// Opaque actor identifier (user id, service account, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AuthzError::InvalidName {
                kind: "actor",
                name: id,
                reason: "must not be empty",
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_identifier {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $ty {
            type Error = AuthzError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = AuthzError;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

impl_identifier!(RoleName);
impl_identifier!(PermissionName);
impl_identifier!(ActorId);

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name
    pub name: RoleName,
    /// Seniority rank, higher is more senior
    pub level: i32,
    /// Parent role (single-parent hierarchy)
    pub parent: Option<RoleName>,
    /// Human readable description
    pub description: String,
    /// Self-service role subject to ownership narrowing
    pub self_scoped: bool,
}

impl Role {
    /// Create a role without a parent
    pub fn new(name: RoleName, level: i32) -> Self {
        Self {
            description: name.to_string(),
            name,
            level,
            parent: None,
            self_scoped: false,
        }
    }

    pub fn with_parent(mut self, parent: RoleName) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn self_scoped(mut self) -> Self {
        self.self_scoped = true;
        self
    }
}

/// Permission definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission name
    pub name: PermissionName,
    /// Human readable description
    pub description: String,
    /// Roles explicitly granted this permission
    pub allowed_roles: BTreeSet<RoleName>,
}

impl Permission {
    pub fn new(name: PermissionName, allowed_roles: BTreeSet<RoleName>) -> Self {
        Self {
            description: String::new(),
            name,
            allowed_roles,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Resource this permission applies to
    pub fn resource(&self) -> &str {
        self.name.resource()
    }

    /// Action this permission allows
    pub fn action(&self) -> &str {
        self.name.action()
    }
}

/// How role grants combine with the role hierarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// A role holds a permission only when it is listed on it
    #[default]
    Direct,
    /// A grant to a role also applies to every ancestor of that role
    Inherited,
}

impl std::str::FromStr for ResolutionMode {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "inherited" => Ok(Self::Inherited),
            other => Err(AuthzError::config(format!(
                "Unknown resolution mode '{}', expected 'direct' or 'inherited'",
                other
            ))),
        }
    }
}

/// Why a decision came out the way it did. Only ever written to logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Granted,
    NoRoleAssigned,
    UnknownPermission,
    RoleNotGranted,
    OwnershipMismatch,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::NoRoleAssigned => "no_role_assigned",
            Self::UnknownPermission => "unknown_permission",
            Self::RoleNotGranted => "role_not_granted",
            Self::OwnershipMismatch => "ownership_mismatch",
        }
    }
}

/// Outcome of a permission or resource check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether access is granted
    pub granted: bool,
    /// Internal reason
    pub reason: DecisionReason,
    /// Role the actor held at evaluation time
    pub role: Option<RoleName>,
}

impl Decision {
    pub(crate) fn grant(role: RoleName) -> Self {
        Self {
            granted: true,
            reason: DecisionReason::Granted,
            role: Some(role),
        }
    }

    pub(crate) fn deny(reason: DecisionReason, role: Option<RoleName>) -> Self {
        Self {
            granted: false,
            reason,
            role,
        }
    }
}
