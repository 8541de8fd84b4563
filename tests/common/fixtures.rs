//! Test fixtures and policy factories
//!
//! All factories create real engines and real files, not mocks.

use abro_authz::AuthorizationEngine;
use abro_authz::config::{Config, PermissionConfig, PolicyConfig, RoleConfig};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// HR preset plus a handful of employees
pub const HR_POLICY_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8088
  admin_api: true
  admin_token: integration-admin-token

rbac:
  resolution: direct
  preset: hr

policy:
  permissions:
    - name: employee.profile.view
      roles: [EMPLOYEE, HR_MANAGER, ADMIN, SUPER_ADMIN]
      description: View an employee profile
  assignments:
    e1: EMPLOYEE
    e2: EMPLOYEE
    hr1: HR_MANAGER
    admin1: ADMIN
    root: SUPER_ADMIN
    c1: CONTRACTOR
"#;

/// Admin token configured in [`HR_POLICY_YAML`]
pub const HR_ADMIN_TOKEN: &str = "integration-admin-token";

/// Custom hierarchy with roles listed children first
pub const CUSTOM_POLICY_YAML: &str = r#"
rbac:
  resolution: inherited

policy:
  roles:
    - name: TEAM_LEAD
      level: 2
      parent: DEPARTMENT_HEAD
    - name: STAFF
      level: 1
      parent: TEAM_LEAD
      self_scoped: true
    - name: DEPARTMENT_HEAD
      level: 3
  permissions:
    - name: timesheet.submit
      roles: [STAFF]
    - name: timesheet.approve
      roles: [TEAM_LEAD]
  self_scoped_resources: [timesheet]
  assignments:
    s1: STAFF
    lead1: TEAM_LEAD
    head1: DEPARTMENT_HEAD
"#;

/// Factory for engines and policies
pub struct PolicyFactory;

impl PolicyFactory {
    /// Engine built from [`HR_POLICY_YAML`]
    pub fn hr_engine() -> AuthorizationEngine {
        let config = Config::from_yaml_str(HR_POLICY_YAML).unwrap();
        AuthorizationEngine::from_config(&config).unwrap()
    }

    /// Engine built from [`CUSTOM_POLICY_YAML`]
    pub fn custom_engine() -> AuthorizationEngine {
        let config = Config::from_yaml_str(CUSTOM_POLICY_YAML).unwrap();
        AuthorizationEngine::from_config(&config).unwrap()
    }

    /// Role entry with defaults
    pub fn role(name: &str, level: i32, parent: Option<&str>) -> RoleConfig {
        RoleConfig {
            name: name.to_string(),
            level,
            parent: parent.map(str::to_string),
            description: None,
            self_scoped: false,
        }
    }

    /// Permission entry with defaults
    pub fn permission(name: &str, roles: &[&str]) -> PermissionConfig {
        PermissionConfig {
            name: name.to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            description: None,
        }
    }

    /// Policy containing only roles
    pub fn roles_only(roles: Vec<RoleConfig>) -> PolicyConfig {
        PolicyConfig {
            roles,
            ..Default::default()
        }
    }
}

/// Policy written to a temporary file, removed on drop
pub struct PolicyFile {
    file: NamedTempFile,
}

impl PolicyFile {
    /// Write `content` to a fresh temporary file
    pub fn new(content: &str) -> Self {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        Self { file }
    }

    /// Path of the temporary file
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
