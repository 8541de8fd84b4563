//! Authorization
//!
//! This module provides the role-based authorization engine.

pub mod rbac;

// Re-export commonly used types
pub use rbac::{AuthorizationEngine, Decision, DecisionReason, ResolutionMode};
