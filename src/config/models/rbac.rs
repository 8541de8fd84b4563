//! RBAC configuration

use crate::auth::rbac::ResolutionMode;
use serde::{Deserialize, Serialize};

/// Built-in policies that can be loaded before the file's own policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// The AbrO HR roles and permissions
    Hr,
}

/// RBAC configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// How grants combine with the role hierarchy
    #[serde(default)]
    pub resolution: ResolutionMode,
    /// Built-in policy loaded first
    #[serde(default)]
    pub preset: Option<Preset>,
}

impl RbacConfig {
    /// Merge RBAC configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.resolution != ResolutionMode::default() {
            self.resolution = other.resolution;
        }
        if other.preset.is_some() {
            self.preset = other.preset;
        }
        self
    }
}
