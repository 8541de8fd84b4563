//! Engine integration tests
//!
//! Exercise the HR preset and a custom inherited hierarchy end to end.

#[cfg(test)]
mod tests {
    use crate::common::{EngineAssertions, PolicyFactory};
    use abro_authz::config::RbacConfig;
    use abro_authz::{AuthorizationEngine, AuthzError, DecisionReason, ResolutionMode};
    use std::sync::Arc;

    // ==================== HR preset ====================

    #[test]
    fn test_employee_self_service() {
        let engine = PolicyFactory::hr_engine();

        engine.assert_granted("e1", "employee.view_profile");
        engine.assert_granted("e1", "employee.request_leave");
        engine.assert_denied("e1", "hr.approve_leave");
        engine.assert_denied("e1", "admin.create_employee");

        engine.assert_resource("e1", ("employee", "e1", "view_payroll"), true);
        engine.assert_resource("e1", ("employee", "e2", "view_payroll"), false);
        engine.assert_resource("e1", ("employee.profile", "e1", "view"), true);
        engine.assert_resource("e1", ("employee.profile", "e2", "view"), false);
    }

    #[test]
    fn test_hr_manager_reaches_every_employee() {
        let engine = PolicyFactory::hr_engine();

        engine.assert_granted("hr1", "hr.approve_leave");
        engine.assert_granted("hr1", "hr.view_all_payroll");
        engine.assert_denied("hr1", "admin.delete_employee");
        engine.assert_resource("hr1", ("employee", "e2", "view_profile"), true);
        engine.assert_resource("hr1", ("employee.profile", "e1", "view"), true);
    }

    #[test]
    fn test_contractor_holds_nothing() {
        let engine = PolicyFactory::hr_engine();

        assert!(engine.get_actor_permissions("c1").is_empty());
        engine.assert_resource("c1", ("employee", "c1", "view_profile"), false);
        assert!(!engine.can_edit_employee("c1", "c1"));
    }

    #[test]
    fn test_only_super_admin_runs_the_system() {
        let engine = PolicyFactory::hr_engine();

        for permission in [
            "system.manage_users",
            "system.manage_settings",
            "system.view_logs",
            "system.configure_auth",
            "admin.delete_employee",
        ] {
            engine.assert_granted("root", permission);
            engine.assert_denied("admin1", permission);
        }
    }

    #[test]
    fn test_guards() {
        let engine = PolicyFactory::hr_engine();

        assert!(engine.can_approve_leave("hr1"));
        assert!(!engine.can_approve_leave("e1"));
        assert!(engine.can_manage_payroll("root"));
        assert!(!engine.can_manage_payroll("c1"));
        assert!(engine.can_edit_employee("admin1", "e1"));
        assert!(engine.can_edit_employee("root", "admin1"));
        assert!(!engine.can_edit_employee("hr1", "e1"));
        assert!(!engine.can_edit_employee("e2", "e2"));
    }

    #[test]
    fn test_seniority() {
        let engine = PolicyFactory::hr_engine();

        assert!(engine.is_role_senior("SUPER_ADMIN", "ADMIN"));
        assert!(engine.is_role_senior("EMPLOYEE", "CONTRACTOR"));
        assert!(!engine.is_role_senior("EMPLOYEE", "HR_MANAGER"));
        assert_eq!(engine.get_role_level("INTERN"), -1);
    }

    #[test]
    fn test_promotion_takes_effect_immediately() {
        let engine = PolicyFactory::hr_engine();
        engine.assert_denied("e2", "hr.approve_leave");

        engine.assign_role("e2", "HR_MANAGER").unwrap();
        engine.assert_granted("e2", "hr.approve_leave");
        engine.assert_resource("e2", ("employee", "e1", "view_profile"), true);

        engine.assign_role("e2", "EMPLOYEE").unwrap();
        engine.assert_denied("e2", "hr.approve_leave");
        engine.assert_resource("e2", ("employee", "e1", "view_profile"), false);
    }

    #[test]
    fn test_removed_permission_is_denied_everywhere() {
        let engine = PolicyFactory::hr_engine();
        engine.assert_granted("root", "admin.export_data");
        engine.assert_granted("admin1", "admin.export_data");

        assert!(engine.remove_permission("admin.export_data"));

        for actor in ["root", "admin1", "hr1", "e1"] {
            let decision = engine.check_permission_detailed(actor, "admin.export_data");
            assert_eq!(decision.reason, DecisionReason::UnknownPermission);
        }
    }

    // ==================== Custom hierarchy ====================

    #[test]
    fn test_custom_policy_loads_children_first() {
        let engine = PolicyFactory::custom_engine();

        assert_eq!(engine.resolution(), ResolutionMode::Inherited);
        let hierarchy: Vec<String> = engine
            .get_role_hierarchy("STAFF")
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(hierarchy, vec!["STAFF", "TEAM_LEAD", "DEPARTMENT_HEAD"]);
    }

    #[test]
    fn test_inherited_grants_flow_upwards_only() {
        let engine = PolicyFactory::custom_engine();

        engine.assert_granted("s1", "timesheet.submit");
        engine.assert_granted("lead1", "timesheet.submit");
        engine.assert_granted("head1", "timesheet.submit");

        engine.assert_denied("s1", "timesheet.approve");
        engine.assert_granted("lead1", "timesheet.approve");
        engine.assert_granted("head1", "timesheet.approve");
    }

    #[test]
    fn test_self_scoped_staff_only_touch_own_timesheets() {
        let engine = PolicyFactory::custom_engine();

        engine.assert_resource("s1", ("timesheet", "s1", "submit"), true);
        engine.assert_resource("s1", ("timesheet", "s2", "submit"), false);
        engine.assert_resource("lead1", ("timesheet", "s1", "submit"), true);
    }

    #[test]
    fn test_same_policy_in_direct_mode() {
        let engine = PolicyFactory::custom_engine();
        engine.set_resolution(ResolutionMode::Direct);

        engine.assert_granted("s1", "timesheet.submit");
        engine.assert_denied("lead1", "timesheet.submit");
        engine.assert_denied("head1", "timesheet.approve");
    }

    #[test]
    fn test_cycle_through_reparenting() {
        let engine = PolicyFactory::custom_engine();

        let err = engine
            .set_role_parent("DEPARTMENT_HEAD", Some("STAFF"))
            .unwrap_err();
        assert!(matches!(err, AuthzError::CyclicHierarchy { .. }));
        assert!(err.to_string().contains("DEPARTMENT_HEAD -> STAFF"));
        assert!(engine.get_role("DEPARTMENT_HEAD").unwrap().parent.is_none());
    }

    #[test]
    fn test_policy_file_cycle_is_rejected() {
        let policy = PolicyFactory::roles_only(vec![
            PolicyFactory::role("A", 1, Some("C")),
            PolicyFactory::role("B", 2, Some("A")),
            PolicyFactory::role("C", 3, Some("B")),
        ]);

        let err = AuthorizationEngine::from_policy(&policy, &RbacConfig::default()).unwrap_err();
        assert!(matches!(err, AuthzError::CyclicHierarchy { .. }));
    }

    #[test]
    fn test_policy_permission_for_missing_role_is_rejected() {
        let mut policy = PolicyFactory::roles_only(vec![PolicyFactory::role("A", 1, None)]);
        policy
            .permissions
            .push(PolicyFactory::permission("doc.read", &["A", "B"]));

        let err = AuthorizationEngine::from_policy(&policy, &RbacConfig::default()).unwrap_err();
        assert!(matches!(err, AuthzError::UnknownRole(ref role) if role == "B"));
    }

    // ==================== Concurrency ====================

    #[test]
    fn test_shared_engine_across_threads() {
        let engine = Arc::new(PolicyFactory::hr_engine());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let actor = format!("worker-{}", i);
                    let role = if i % 2 == 0 { "HR_MANAGER" } else { "EMPLOYEE" };
                    engine.assign_role(&actor, role).unwrap();
                    for _ in 0..200 {
                        assert_eq!(engine.can_approve_leave(&actor), i % 2 == 0);
                        assert!(engine.has_permission(&actor, "employee.view_profile"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(engine.assignment_count(), 6 + 8);
    }
}
