//! Utility modules
//!
//! Error handling and logging shared across the crate.

pub mod error;
pub mod logging;
