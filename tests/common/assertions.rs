//! Custom test assertions
//!
//! Failing checks print the internal decision reason, which the engine
//! otherwise only logs.

use abro_authz::AuthorizationEngine;

/// Assertions for AuthorizationEngine
pub trait EngineAssertions {
    /// Assert `actor` holds `permission`
    fn assert_granted(&self, actor: &str, permission: &str);

    /// Assert `actor` does not hold `permission`
    fn assert_denied(&self, actor: &str, permission: &str);

    /// Assert the resource check for `actor` comes out as `expected`
    fn assert_resource(
        &self,
        actor: &str,
        resource: (&str, &str, &str),
        expected: bool,
    );
}

impl EngineAssertions for AuthorizationEngine {
    fn assert_granted(&self, actor: &str, permission: &str) {
        let decision = self.check_permission_detailed(actor, permission);
        assert!(
            decision.granted,
            "Expected {} to hold {}, denied with {:?}",
            actor, permission, decision.reason
        );
    }

    fn assert_denied(&self, actor: &str, permission: &str) {
        let decision = self.check_permission_detailed(actor, permission);
        assert!(
            !decision.granted,
            "Expected {} not to hold {} (role {:?})",
            actor, permission, decision.role
        );
    }

    fn assert_resource(
        &self,
        actor: &str,
        (resource_type, resource_id, action): (&str, &str, &str),
        expected: bool,
    ) {
        let decision = self.check_resource_detailed(actor, resource_type, resource_id, action);
        assert_eq!(
            decision.granted, expected,
            "{} on {}/{} ({}): {:?}",
            actor, resource_type, resource_id, action, decision.reason
        );
    }
}
