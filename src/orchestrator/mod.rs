//! Clock orchestrator: the shared tick loop, its telemetry and the render sink seam.

/// Tick loop and layer registry.
pub mod engine;
/// Render-collaborator seam.
pub mod sink;
/// Frame-rate statistics and the bounded error log.
pub mod stats;
