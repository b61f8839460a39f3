//! Wall-clock reading: time sources and hand angles.

/// Injectable time sources.
pub mod source;
/// Instant to hour/minute/second angles.
pub mod time;
