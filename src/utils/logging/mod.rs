//! Logging utilities
//!
//! This module provides structured security logging and subscriber setup.

pub mod security_logger;
pub mod setup;

// Re-export commonly used types and functions
pub use security_logger::SecurityLogger;
pub use setup::{LogFormat, init_logging};
