//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `server_validators`: server settings
//! - `policy_validators`: policy definitions
//! - `tests`: test suite for all validators

mod policy_validators;
mod server_validators;
mod trait_def;

pub use trait_def::Validate;
