//! Rotation math: spin angles, orbital offsets and the dual-rotation composer.

/// Combine spin + orbit into one transform.
pub mod compose;
/// Radius + angle to offset.
pub mod orbit;
/// Elapsed time + speed to angle.
pub mod spin;
