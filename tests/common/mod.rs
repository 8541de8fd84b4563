//! Common test utilities for abro-authz
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{EngineAssertions, PolicyFactory};
//!
//! let engine = PolicyFactory::hr_engine();
//! engine.assert_granted("e1", "employee.view_profile");
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::EngineAssertions;
pub use fixtures::{PolicyFactory, PolicyFile};
