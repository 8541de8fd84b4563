//! Validation trait definition

/// Structural validation of a configuration section.
///
/// Checks here are local to the section. Cross references (a permission
/// naming an unregistered role, a parent cycle) are reported by the engine
/// when the policy is loaded.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
