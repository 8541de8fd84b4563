//! RBAC engine core state

use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::types::{ActorId, Permission, PermissionName, ResolutionMode, Role, RoleName};

/// Registry state guarded by the engine lock
#[derive(Debug, Default)]
pub(super) struct Registry {
    /// Role definitions
    pub(super) roles: HashMap<RoleName, Role>,
    /// Permission definitions
    pub(super) permissions: HashMap<PermissionName, Permission>,
    /// Actor to role assignments
    pub(super) assignments: HashMap<ActorId, RoleName>,
    /// Resource types where self-scoped roles only reach their own resources
    pub(super) self_scoped_resources: HashSet<String>,
    /// How grants combine with the hierarchy
    pub(super) resolution: ResolutionMode,
}

/// Resolved permission set for one actor
pub(super) type ResolvedPermissions = Arc<HashSet<PermissionName>>;

/// Authorization engine answering role and permission queries for actors.
///
/// The engine is meant to be constructed once at startup and shared as
/// `Arc<AuthorizationEngine>`. Registration calls take the write lock;
/// queries share the read lock and never fail.
///
/// ```
/// use abro_authz::AuthorizationEngine;
///
/// let engine = AuthorizationEngine::new();
/// engine.register_role("EMPLOYEE", 1, None).unwrap();
/// engine.register_role("HR_MANAGER", 3, None).unwrap();
/// engine
///     .define_permission("hr.approve_leave", ["HR_MANAGER"])
///     .unwrap();
///
/// engine.assign_role("u1", "EMPLOYEE").unwrap();
/// assert!(!engine.has_permission("u1", "hr.approve_leave"));
///
/// engine.assign_role("u1", "HR_MANAGER").unwrap();
/// assert!(engine.has_permission("u1", "hr.approve_leave"));
/// ```
pub struct AuthorizationEngine {
    pub(super) state: RwLock<Registry>,
    /// Per-actor resolved permissions. Filled under the read lock, cleared
    /// under the write lock, so entries always match the current registry.
    pub(super) cache: DashMap<String, ResolvedPermissions>,
}

impl AuthorizationEngine {
    /// Create an empty engine with direct-grant resolution
    pub fn new() -> Self {
        Self::with_resolution(ResolutionMode::Direct)
    }

    /// Create an empty engine with the given resolution mode
    pub fn with_resolution(resolution: ResolutionMode) -> Self {
        info!("Initializing authorization engine ({:?} resolution)", resolution);

        Self {
            state: RwLock::new(Registry {
                resolution,
                ..Registry::default()
            }),
            cache: DashMap::new(),
        }
    }

    /// Current resolution mode
    pub fn resolution(&self) -> ResolutionMode {
        self.state.read().resolution
    }

    /// Switch resolution mode, dropping every cached permission set
    pub fn set_resolution(&self, resolution: ResolutionMode) {
        let mut state = self.state.write();
        state.resolution = resolution;
        self.cache.clear();
        debug!("Resolution mode set to {:?}", resolution);
    }

    /// Drop every cached permission set. Caller must hold the write lock.
    pub(super) fn invalidate_all(&self) {
        self.cache.clear();
    }

    /// Resolved permissions for `actor`, computed on first use.
    ///
    /// Takes the caller's read guard so the cache entry is inserted while the
    /// registry it was computed from is still locked.
    pub(super) fn resolved_permissions(
        &self,
        state: &Registry,
        actor: &str,
    ) -> Option<ResolvedPermissions> {
        if let Some(entry) = self.cache.get(actor) {
            return Some(Arc::clone(entry.value()));
        }

        let role = state.assignments.get(actor)?;
        let resolved: ResolvedPermissions = Arc::new(
            state
                .permissions
                .values()
                .filter(|permission| state.role_holds(role, permission))
                .map(|permission| permission.name.clone())
                .collect(),
        );

        self.cache.insert(actor.to_string(), Arc::clone(&resolved));
        Some(resolved)
    }

    /// Number of registered roles
    pub fn role_count(&self) -> usize {
        self.state.read().roles.len()
    }

    /// Number of defined permissions
    pub fn permission_count(&self) -> usize {
        self.state.read().permissions.len()
    }

    /// Number of actors with an assigned role
    pub fn assignment_count(&self) -> usize {
        self.state.read().assignments.len()
    }
}

impl Default for AuthorizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("AuthorizationEngine")
            .field("resolution", &state.resolution)
            .field("roles", &state.roles.len())
            .field("permissions", &state.permissions.len())
            .field("assignments", &state.assignments.len())
            .field("cached_actors", &self.cache.len())
            .finish()
    }
}
