//! Integration tests for abro-authz
//!
//! These tests go through the public API and real policy files, without
//! mocking.

pub mod config_tests;
pub mod engine_tests;
pub mod server_tests;
