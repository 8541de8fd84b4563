//! Actor to role assignment

use crate::utils::error::{AuthzError, Result};
use crate::utils::logging::SecurityLogger;

use super::system::AuthorizationEngine;
use super::types::{ActorId, RoleName};

impl AuthorizationEngine {
    /// Assign `role` to `actor`, replacing any previous assignment
    pub fn assign_role(&self, actor: &str, role: &str) -> Result<()> {
        let actor = ActorId::new(actor)?;
        let mut state = self.state.write();

        let role = state
            .roles
            .get(role)
            .map(|existing| existing.name.clone())
            .ok_or_else(|| AuthzError::UnknownRole(role.to_string()))?;

        state.assignments.insert(actor.clone(), role);
        self.cache.remove(actor.as_str());

        SecurityLogger::log_registry_change("assign_role", actor.as_str());
        Ok(())
    }

    /// Drop the actor's assignment. Returns whether one existed.
    pub fn revoke_role(&self, actor: &str) -> bool {
        let mut state = self.state.write();
        let revoked = state.assignments.remove(actor).is_some();
        self.cache.remove(actor);

        if revoked {
            SecurityLogger::log_registry_change("revoke_role", actor);
        }
        revoked
    }

    /// Role currently assigned to `actor`
    pub fn get_actor_role(&self, actor: &str) -> Option<RoleName> {
        self.state.read().assignments.get(actor).cloned()
    }
}
