//! Layer configuration: data model, sanitize/validate step, profiles.

/// Serde data model for layers and rotations.
pub mod model;
/// Data-driven override rules.
pub mod profile;
/// Sanitize and validate layer sets.
pub mod validate;
