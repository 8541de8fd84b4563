//! Built-in HR policy: the roles and permissions of the AbrO HR product

use crate::utils::error::Result;
use tracing::debug;

use super::system::AuthorizationEngine;
use super::types::{Role, RoleName};

pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
pub const ADMIN: &str = "ADMIN";
pub const HR_MANAGER: &str = "HR_MANAGER";
pub const EMPLOYEE: &str = "EMPLOYEE";
pub const CONTRACTOR: &str = "CONTRACTOR";

pub const APPROVE_LEAVE: &str = "hr.approve_leave";
pub const VIEW_ALL_PAYROLL: &str = "hr.view_all_payroll";
pub const EDIT_EMPLOYEE: &str = "admin.edit_employee";

/// Resource type for employee records, self-scoped in the HR preset
pub const EMPLOYEE_RESOURCE: &str = "employee";
/// Resource type for employee profiles, self-scoped in the HR preset
pub const EMPLOYEE_PROFILE_RESOURCE: &str = "employee.profile";

const EVERYONE: &[&str] = &[EMPLOYEE, HR_MANAGER, ADMIN, SUPER_ADMIN];
const HR_AND_ABOVE: &[&str] = &[HR_MANAGER, ADMIN, SUPER_ADMIN];
const ADMINS: &[&str] = &[ADMIN, SUPER_ADMIN];
const SUPER_ONLY: &[&str] = &[SUPER_ADMIN];

impl AuthorizationEngine {
    /// Engine preloaded with the HR preset
    pub fn with_hr_defaults() -> Result<Self> {
        let engine = Self::new();
        engine.load_hr_defaults()?;
        Ok(engine)
    }

    /// Load the HR roles, permissions and self-scoped resources.
    ///
    /// Senior roles are listed explicitly on every permission they hold, so
    /// the preset behaves the same under both resolution modes.
    pub fn load_hr_defaults(&self) -> Result<()> {
        debug!("Loading HR default roles");

        let default_roles = vec![
            Role::new(RoleName::new(SUPER_ADMIN)?, 5).with_description("Super Admin"),
            Role::new(RoleName::new(ADMIN)?, 4)
                .with_parent(RoleName::new(SUPER_ADMIN)?)
                .with_description("Administrator"),
            Role::new(RoleName::new(HR_MANAGER)?, 3)
                .with_parent(RoleName::new(ADMIN)?)
                .with_description("HR Manager"),
            Role::new(RoleName::new(EMPLOYEE)?, 1)
                .with_description("Employee")
                .self_scoped(),
            Role::new(RoleName::new(CONTRACTOR)?, 0).with_description("Contractor"),
        ];

        for role in default_roles {
            self.register(role)?;
        }

        debug!("Loading HR default permissions");

        let default_permissions: &[(&str, &[&str])] = &[
            // Employee self-service
            ("employee.view_profile", EVERYONE),
            ("employee.edit_profile", EVERYONE),
            ("employee.view_payroll", EVERYONE),
            ("employee.request_leave", EVERYONE),
            ("employee.view_documents", EVERYONE),
            // HR management
            (APPROVE_LEAVE, HR_AND_ABOVE),
            ("hr.reject_leave", HR_AND_ABOVE),
            ("hr.view_all_attendance", HR_AND_ABOVE),
            (VIEW_ALL_PAYROLL, HR_AND_ABOVE),
            ("hr.manage_leave_types", HR_AND_ABOVE),
            // Administration
            ("admin.create_employee", ADMINS),
            (EDIT_EMPLOYEE, ADMINS),
            ("admin.delete_employee", SUPER_ONLY),
            ("admin.manage_departments", ADMINS),
            ("admin.manage_roles", ADMINS),
            ("admin.view_analytics", ADMINS),
            ("admin.export_data", ADMINS),
            // System
            ("system.manage_users", SUPER_ONLY),
            ("system.manage_settings", SUPER_ONLY),
            ("system.view_logs", SUPER_ONLY),
            ("system.configure_auth", SUPER_ONLY),
        ];

        for (name, roles) in default_permissions {
            self.define_permission(name, roles.iter())?;
        }

        self.register_self_scoped_resource(EMPLOYEE_RESOURCE);
        self.register_self_scoped_resource(EMPLOYEE_PROFILE_RESOURCE);

        debug!(
            "Loaded {} HR roles and {} HR permissions",
            self.role_count(),
            self.permission_count()
        );
        Ok(())
    }
}
