//! Error handling utilities
//!
//! This module defines the error type shared by the engine, the configuration
//! layer and the HTTP decision service.

pub mod error;

// Re-export commonly used types
pub use error::*;
