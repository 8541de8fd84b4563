//! Policy file integration tests
//!
//! Load policy files from disk and build engines from them.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{CUSTOM_POLICY_YAML, HR_POLICY_YAML};
    use crate::common::{EngineAssertions, PolicyFile};
    use abro_authz::config::Preset;
    use abro_authz::{AuthorizationEngine, AuthzError, Config, ResolutionMode};

    #[tokio::test]
    async fn test_load_hr_policy_file() {
        let file = PolicyFile::new(HR_POLICY_YAML);

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.rbac().preset, Some(Preset::Hr));
        assert_eq!(config.policy().assignments.len(), 6);

        let engine = AuthorizationEngine::from_config(&config).unwrap();
        assert_eq!(engine.role_count(), 5);
        assert_eq!(engine.permission_count(), 22);
        engine.assert_granted("hr1", "hr.approve_leave");
    }

    #[tokio::test]
    async fn test_load_custom_policy_file() {
        let file = PolicyFile::new(CUSTOM_POLICY_YAML);

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.rbac().resolution, ResolutionMode::Inherited);
        assert!(config.rbac().preset.is_none());

        let engine = AuthorizationEngine::from_config(&config).unwrap();
        assert!(engine.is_self_scoped_resource("timesheet"));
        assert!(engine.get_role("STAFF").unwrap().self_scoped);
    }

    #[tokio::test]
    async fn test_duplicate_roles_fail_validation() {
        let file = PolicyFile::new(
            r#"
policy:
  roles:
    - { name: STAFF, level: 1 }
    - { name: STAFF, level: 2 }
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, AuthzError::Config(ref message) if message.contains("STAFF")));
    }

    #[tokio::test]
    async fn test_invalid_port_fails_validation() {
        let file = PolicyFile::new("server:\n  port: 0\n");

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(AuthzError::Config(_))));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_reported() {
        let file = PolicyFile::new("policy: [unterminated");

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(AuthzError::Config(_))));
    }

    #[tokio::test]
    async fn test_structurally_valid_but_cyclic_policy() {
        // Passes section validation; the engine rejects the cycle
        let file = PolicyFile::new(
            r#"
policy:
  roles:
    - { name: A, level: 1, parent: B }
    - { name: B, level: 2, parent: A }
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        let err = AuthorizationEngine::from_config(&config).unwrap_err();
        assert!(matches!(err, AuthzError::CyclicHierarchy { .. }));
        assert!(err.is_registry_error());
    }

    #[tokio::test]
    async fn test_invalid_permission_name_in_file() {
        let file = PolicyFile::new(
            r#"
rbac:
  preset: hr
policy:
  permissions:
    - { name: approve_everything, roles: [ADMIN] }
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        let err = AuthorizationEngine::from_config(&config).unwrap_err();
        assert!(matches!(err, AuthzError::InvalidName { .. }));
    }

    #[tokio::test]
    async fn test_shipped_policy_file_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/authz.yaml");

        let config = Config::from_file(&path).await.unwrap();
        let engine = AuthorizationEngine::from_config(&config).unwrap();

        engine.assign_role("i1", "INTERN").unwrap();
        engine.assert_granted("i1", "employee.view_profile");
        engine.assert_denied("i1", "employee.request_leave");
        engine.assert_granted("admin@abro.example", "system.view_logs");
    }
}
