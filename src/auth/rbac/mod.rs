//! Role-Based Access Control (RBAC) engine
//!
//! Roles carry a seniority level and an optional parent. Permissions are
//! named `resource.action` and granted to explicit role sets. Actors hold one
//! role at a time. Resource checks add ownership narrowing for self-service
//! roles on self-scoped resource types.

mod assignments;
pub mod defaults;
mod helpers;
mod permissions;
mod policy;
mod resources;
mod roles;
mod system;
mod types;

// Re-export public types and structs
pub use system::AuthorizationEngine;
pub use types::{
    ActorId, Decision, DecisionReason, Permission, PermissionName, ResolutionMode, Role, RoleName,
    UNKNOWN_ROLE_LEVEL,
};
