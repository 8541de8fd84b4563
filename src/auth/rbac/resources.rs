//! Resource-level access control

use crate::utils::logging::SecurityLogger;

use super::defaults::{APPROVE_LEAVE, EDIT_EMPLOYEE, EMPLOYEE_RESOURCE, VIEW_ALL_PAYROLL};
use super::system::{AuthorizationEngine, Registry};
use super::types::{Decision, DecisionReason};

impl AuthorizationEngine {
    /// Mark a resource type as self-scoped.
    ///
    /// Actors holding a self-scoped role reach such resources only when the
    /// resource id is their own actor id.
    pub fn register_self_scoped_resource(&self, resource_type: &str) {
        let mut state = self.state.write();
        if state.self_scoped_resources.insert(resource_type.to_string()) {
            SecurityLogger::log_registry_change("register_self_scoped_resource", resource_type);
        }
    }

    /// Whether `resource_type` is self-scoped
    pub fn is_self_scoped_resource(&self, resource_type: &str) -> bool {
        self.state
            .read()
            .self_scoped_resources
            .contains(resource_type)
    }

    /// Whether `actor` may perform `action` on `resource_id` of `resource_type`.
    ///
    /// The global grant of `resource_type.action` is necessary. For
    /// self-scoped roles on self-scoped resource types it is not sufficient:
    /// the resource must also belong to the actor.
    pub fn can_access_resource(
        &self,
        actor: &str,
        resource_type: &str,
        resource_id: &str,
        action: &str,
    ) -> bool {
        self.check_resource_detailed(actor, resource_type, resource_id, action)
            .granted
    }

    /// Resource check with the internal reason attached
    pub fn check_resource_detailed(
        &self,
        actor: &str,
        resource_type: &str,
        resource_id: &str,
        action: &str,
    ) -> Decision {
        let permission = format!("{}.{}", resource_type, action);
        let state = self.state.read();

        let decision = self.evaluate_permission(&state, actor, &permission);
        let decision = narrow_to_owner(&state, decision, actor, resource_type, resource_id);

        SecurityLogger::log_authz_event(actor, &permission, Some(resource_id), &decision);
        decision
    }

    /// Whether `actor` may see and manage payroll for everyone
    pub fn can_manage_payroll(&self, actor: &str) -> bool {
        self.has_permission(actor, VIEW_ALL_PAYROLL)
    }

    /// Whether `actor` may approve leave requests
    pub fn can_approve_leave(&self, actor: &str) -> bool {
        self.has_permission(actor, APPROVE_LEAVE)
    }

    /// Whether `actor` may edit the employee record `target`.
    ///
    /// Requires `admin.edit_employee`; ownership narrowing on the `employee`
    /// resource then applies to the role that granted it.
    pub fn can_edit_employee(&self, actor: &str, target: &str) -> bool {
        let state = self.state.read();
        let decision = self.evaluate_permission(&state, actor, EDIT_EMPLOYEE);
        let decision = narrow_to_owner(&state, decision, actor, EMPLOYEE_RESOURCE, target);

        SecurityLogger::log_authz_event(actor, EDIT_EMPLOYEE, Some(target), &decision);
        decision.granted
    }
}

/// Deny a granted decision when a self-scoped role reaches someone else's
/// resource of a self-scoped type.
fn narrow_to_owner(
    state: &Registry,
    decision: Decision,
    actor: &str,
    resource_type: &str,
    resource_id: &str,
) -> Decision {
    if !decision.granted {
        return decision;
    }

    let self_scoped_role = decision
        .role
        .as_ref()
        .and_then(|role| state.roles.get(role))
        .is_some_and(|role| role.self_scoped);

    if self_scoped_role
        && state.self_scoped_resources.contains(resource_type)
        && resource_id != actor
    {
        Decision::deny(DecisionReason::OwnershipMismatch, decision.role)
    } else {
        decision
    }
}
