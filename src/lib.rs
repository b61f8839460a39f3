//! Horologe is a multi-layer animated clock engine.
//!
//! Up to 20 independently configured layers each carry two rotations: a self-spin around a
//! pivot (`rotation1`) and an orbit of that pivot around a separate center (`rotation2`).
//! Layers are driven either by the time of day (clock hands, with per-layer timezone and
//! 12h/24h dials) or by their own elapsed time (decorations).
//!
//! # Pipeline overview
//!
//! 1. **Configure**: JSON -> [`LayerConfig`] via [`parse_layer_set`] (sanitize, then validate)
//! 2. **Clock**: [`TimeSource`] -> [`ClockState`], computed once per tick
//! 3. **Compose**: `LayerConfig + ClockState + elapsed -> DualRotationResult`
//! 4. **Orchestrate**: [`ClockOrchestrator::tick`] fans the clock out to every layer and hands
//!    frames to a [`LayerSink`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-driven**: the engine never schedules itself; the host calls `tick(delta)`.
//! - **Faults stay local**: a broken layer renders an identity transform and is reported
//!   through callbacks and the error log; the tick loop never fails because of it.
//! - **Single writer**: all per-layer state lives in a fixed 20-slot arena owned by the
//!   orchestrator.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod foundation;
mod layer;
mod orchestrator;
mod rotation;

pub use clock::source::{ManualTimeSource, SystemTimeSource, TimeSource, fixed_offset_from_hours};
pub use clock::time::{
    ClockState, ClockTimeProvider, HourMode, MAX_UTC_OFFSET_HOURS, MIN_UTC_OFFSET_HOURS,
};
pub use config::model::{
    Direction, EffectFlags, HandType, LayerConfig, RotationConfig, RotationSlot, TimezoneConfig,
};
pub use config::profile::{DEFAULT_SPEED_BUCKETS, LayerProfile, LayerRole, ProfileRules};
pub use config::validate::{
    ConfigErrors, ConfigIssue, MAX_SIZE, MAX_SPEED, MIN_SIZE, MIN_SPEED, PathElem, Sanitized,
    ValidatedLayers, parse_layer_set, sanitize_layer, sanitize_layer_set, validate_layer_set,
};
pub use foundation::core::{Affine, LayerId, MAX_LAYERS, Point, Vec2};
pub use foundation::error::{HorologeError, HorologeResult};
pub use foundation::math::{
    clamp, deg_to_rad, distance, interpolate_angle, lerp, normalize_180, normalize_360,
    rad_to_deg,
};
pub use layer::animator::{ErrorHandler, LayerAnimator, LayerFrame, LayerPhase};
pub use layer::complexity::{ComplexityLevel, ComplexityReport, assess_complexity};
pub use layer::slots::LayerSlots;
pub use orchestrator::engine::{
    ClockOrchestrator, HandSmoothing, OrchestratorOpts, OrchestratorStatus, RunState, TickReport,
};
pub use orchestrator::sink::{InMemorySink, LayerSink, RecordedFrame};
pub use orchestrator::stats::{ErrorEntry, ErrorLog, FrameStats, LATE_FRAME_FACTOR};
pub use rotation::compose::{
    ComposeCtx, DualRotationComposer, DualRotationResult, TransformOrigin,
};
pub use rotation::orbit::{orbit_angle_for_hand, orbital_offset};
pub use rotation::spin::{spin_angle, spin_angle_for_elapsed};
