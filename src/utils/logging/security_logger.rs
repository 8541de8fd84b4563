//! Security-aware logging utilities
//!
//! Every authorization decision and registry mutation is emitted as a
//! structured `tracing` event under the `security` target. Decision reasons
//! only ever reach these logs, never the denied caller.

use crate::auth::rbac::Decision;
use tracing::{debug, warn};

/// Longest caller-supplied value written to logs
const MAX_LOGGED_ID_LEN: usize = 128;

/// Security-aware logging utilities
pub struct SecurityLogger;

impl SecurityLogger {
    /// Log an authorization decision
    pub fn log_authz_event(
        actor: &str,
        permission: &str,
        resource_id: Option<&str>,
        decision: &Decision,
    ) {
        let request = LoggedRequest::new(actor, permission, resource_id);
        let role = decision
            .role
            .as_ref()
            .map(|role| role.as_str())
            .unwrap_or("-");

        if decision.granted {
            debug!(
                target: "security",
                actor = %request.actor,
                role = %role,
                permission = %request.permission,
                resource_id = %request.resource_id,
                granted = true,
                "Authorization granted: {}",
                request.permission
            );
        } else {
            warn!(
                target: "security",
                actor = %request.actor,
                role = %role,
                permission = %request.permission,
                resource_id = %request.resource_id,
                granted = false,
                reason = decision.reason.as_str(),
                "Authorization denied: {}",
                request.permission
            );
        }
    }

    /// Log a rejected call to the admin API
    pub fn log_admin_auth_failure(path: &str, peer: Option<&str>) {
        warn!(
            target: "security",
            path = %sanitize(path),
            peer = %peer.map(sanitize).unwrap_or_default(),
            "Admin API request rejected"
        );
    }

    /// Log a registry mutation
    pub fn log_registry_change(operation: &str, subject: &str) {
        debug!(
            target: "security",
            operation = operation,
            subject = %sanitize(subject),
            "Registry updated: {}",
            operation
        );
    }
}

/// Caller-supplied fields of a decision, safe to write to logs
#[derive(Debug, PartialEq)]
struct LoggedRequest {
    actor: String,
    permission: String,
    resource_id: String,
}

impl LoggedRequest {
    fn new(actor: &str, permission: &str, resource_id: Option<&str>) -> Self {
        Self {
            actor: sanitize(actor),
            permission: sanitize(permission),
            resource_id: resource_id.map(sanitize).unwrap_or_default(),
        }
    }
}

/// Truncate and strip control characters to prevent log injection
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_LOGGED_ID_LEN)
        .collect()
}
