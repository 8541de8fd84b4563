//! Configuration data models
//!
//! This module defines all configuration structures used by the engine and
//! the decision service.

#![allow(missing_docs)]

pub mod policy;
pub mod rbac;
pub mod server;

// Re-export all configuration types
pub use policy::*;
pub use rbac::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8088
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    64 * 1024 // 64KB
}
