use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::source::TimeSource;
use crate::clock::time::{ClockState, ClockTimeProvider, HourMode};
use crate::config::model::{LayerConfig, TimezoneConfig};
use crate::config::profile::LayerProfile;
use crate::config::validate::{Sanitized, sanitize_layer};
use crate::foundation::core::LayerId;
use crate::foundation::error::{HorologeError, HorologeResult};
use crate::foundation::math::interpolate_angle;
use crate::layer::animator::{LayerAnimator, LayerFrame};
use crate::layer::complexity::ComplexityReport;
use crate::layer::slots::LayerSlots;
use crate::orchestrator::sink::LayerSink;
use crate::orchestrator::stats::{ErrorEntry, ErrorLog, FrameStats};

/// Per-hand smoothing factors in `(0, 1]`. `1.0` jumps straight to the target angle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HandSmoothing {
    /// Hour hand.
    pub hour: f64,
    /// Minute hand.
    pub minute: f64,
    /// Second hand.
    pub second: f64,
}

impl Default for HandSmoothing {
    fn default() -> Self {
        Self {
            hour: 1.0,
            minute: 1.0,
            second: 1.0,
        }
    }
}

/// Options for [`ClockOrchestrator`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OrchestratorOpts {
    /// Hour mode of the master clock.
    pub hour_mode: HourMode,
    /// Smoothing for layers with their own timezone.
    pub smoothing: HandSmoothing,
    /// Most recent errors kept in the status report.
    pub error_log_capacity: usize,
    /// Ticks in the rolling frame-rate window.
    pub frame_window: usize,
    /// Frame budget used for late-frame accounting.
    pub target_fps: f64,
    /// Pause and resume after repeated failures instead of stopping.
    pub auto_recover: bool,
    /// Consecutive failing ticks that count as an orchestrator error.
    pub failure_threshold: u32,
    /// Pause before resuming after repeated failures.
    pub recovery_delay_ms: u64,
}

impl Default for OrchestratorOpts {
    fn default() -> Self {
        Self {
            hour_mode: HourMode::Twelve,
            smoothing: HandSmoothing::default(),
            error_log_capacity: 20,
            frame_window: 60,
            target_fps: 60.0,
            auto_recover: true,
            failure_threshold: 3,
            recovery_delay_ms: 1000,
        }
    }
}

impl OrchestratorOpts {
    /// Reject option values the orchestrator cannot run with.
    pub fn validate(&self) -> HorologeResult<()> {
        let s = self.smoothing;
        for (hand, v) in [("hour", s.hour), ("minute", s.minute), ("second", s.second)] {
            if !(v.is_finite() && v > 0.0 && v <= 1.0) {
                return Err(HorologeError::validation(format!(
                    "smoothing.{hand} must be in (0, 1], got {v}"
                )));
            }
        }
        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(HorologeError::validation("target_fps must be positive"));
        }
        if self.frame_window == 0 {
            return Err(HorologeError::validation("frame_window must be at least 1"));
        }
        if self.error_log_capacity == 0 {
            return Err(HorologeError::validation(
                "error_log_capacity must be at least 1",
            ));
        }
        if self.failure_threshold == 0 {
            return Err(HorologeError::validation(
                "failure_threshold must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Tick-loop state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Ticks are ignored; `start` re-anchors layer timing.
    #[default]
    Stopped,
    /// Ticks produce frames.
    Running,
    /// Ticks are ignored; layer timing is kept.
    Paused,
    /// Waiting out the recovery delay after repeated failures.
    Recovering {
        /// Delay left before ticks resume.
        remaining: Duration,
    },
}

/// Snapshot for the diagnostics collaborator.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OrchestratorStatus {
    /// The tick loop is alive (running or recovering).
    pub is_running: bool,
    /// Tick-loop state.
    pub state: RunState,
    /// Rolling frames per second.
    pub frame_rate: f64,
    /// Ticks since creation.
    pub total_frames: u64,
    /// Ticks that overran the frame budget.
    pub late_frames: u64,
    /// Registered, visible layers.
    pub active_layer_count: usize,
    /// Most recent errors, oldest first.
    pub errors: Vec<ErrorEntry>,
}

/// Output of one productive tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TickReport {
    /// Master clock state, shared by every layer without its own timezone.
    pub clock: ClockState,
    /// Visible layers in ascending layer order.
    pub layers: Vec<LayerFrame>,
    /// Layers that faulted this tick.
    pub failed_layers: usize,
}

type FrameCallback = Box<dyn FnMut(&ClockState)>;
type ErrorCallback = Box<dyn FnMut(Option<LayerId>, &str)>;

struct Slot {
    animator: LayerAnimator,
    clock: Option<ClockState>,
}

/// Top-level coordinator: one master clock per tick, fanned out to up to 20 layers.
///
/// Driven by the host through [`ClockOrchestrator::tick`]; it never schedules itself. Layer
/// faults are absorbed and reported, never returned from `tick`.
pub struct ClockOrchestrator<S: TimeSource> {
    source: S,
    opts: OrchestratorOpts,
    layers: LayerSlots<Slot>,
    state: RunState,
    stats: FrameStats,
    errors: ErrorLog,
    consecutive_failures: u32,
    on_frame: Option<FrameCallback>,
    on_error: Option<ErrorCallback>,
}

impl<S: TimeSource> ClockOrchestrator<S> {
    /// Stopped orchestrator with no layers.
    pub fn new(source: S, opts: OrchestratorOpts) -> HorologeResult<Self> {
        opts.validate()?;
        Ok(Self {
            source,
            stats: FrameStats::new(opts.frame_window, opts.target_fps),
            errors: ErrorLog::new(opts.error_log_capacity),
            opts,
            layers: LayerSlots::new(),
            state: RunState::Stopped,
            consecutive_failures: 0,
            on_frame: None,
            on_error: None,
        })
    }

    /// Options in effect.
    pub fn opts(&self) -> &OrchestratorOpts {
        &self.opts
    }

    /// Time source.
    pub fn time_source(&self) -> &S {
        &self.source
    }

    /// Time source, for hosts that drive time explicitly.
    pub fn time_source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Tick-loop state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Called with the master clock state at the start of every productive tick.
    pub fn on_frame(&mut self, callback: impl FnMut(&ClockState) + 'static) {
        self.on_frame = Some(Box::new(callback));
    }

    /// Called for every recorded error; the layer is `None` for orchestrator-level errors.
    pub fn on_error(&mut self, callback: impl FnMut(Option<LayerId>, &str) + 'static) {
        self.on_error = Some(Box::new(callback));
    }

    /// Start ticking. From `Stopped`, re-anchors every layer's timing at "now"; from
    /// `Paused`, behaves like [`resume`](Self::resume).
    pub fn start(&mut self) {
        match self.state {
            RunState::Stopped => {
                let now = self.source.now();
                for (_, slot) in self.layers.iter_mut() {
                    slot.animator.restart(now);
                    slot.clock = None;
                }
                self.consecutive_failures = 0;
                self.state = RunState::Running;
                tracing::info!(layers = self.layers.len(), "orchestrator started");
            }
            RunState::Paused => {
                self.state = RunState::Running;
                tracing::info!("orchestrator resumed");
            }
            RunState::Running | RunState::Recovering { .. } => {}
        }
    }

    /// Stop ticking. Layers stay registered.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            self.state = RunState::Stopped;
            self.consecutive_failures = 0;
            tracing::info!("orchestrator stopped");
        }
    }

    /// Suspend ticking without touching layer timing. A pending recovery delay is dropped.
    pub fn pause(&mut self) -> HorologeResult<()> {
        match self.state {
            RunState::Stopped => Err(HorologeError::orchestrator(
                "cannot pause a stopped orchestrator",
            )),
            RunState::Paused => Ok(()),
            RunState::Running | RunState::Recovering { .. } => {
                self.state = RunState::Paused;
                tracing::info!("orchestrator paused");
                Ok(())
            }
        }
    }

    /// Continue after [`pause`](Self::pause).
    pub fn resume(&mut self) -> HorologeResult<()> {
        match self.state {
            RunState::Stopped => Err(HorologeError::orchestrator(
                "cannot resume a stopped orchestrator; call start",
            )),
            RunState::Paused => {
                self.state = RunState::Running;
                tracing::info!("orchestrator resumed");
                Ok(())
            }
            RunState::Running | RunState::Recovering { .. } => Ok(()),
        }
    }

    /// Register layer `id`. The config is sanitized; `itemLayer` must equal `id`.
    pub fn add_layer(&mut self, id: LayerId, config: LayerConfig) -> HorologeResult<()> {
        if self.layers.contains(id) {
            return Err(HorologeError::validation(format!(
                "{id} is already registered"
            )));
        }
        let config = sanitized(id, config);
        let placeholder = needs_placeholder(&config);
        let animator = LayerAnimator::new(id, config)?;
        self.layers.insert(
            id,
            Slot {
                animator,
                clock: None,
            },
        );
        tracing::debug!(layer = %id, "layer added");
        if placeholder {
            self.record_fallback(id);
        }
        Ok(())
    }

    /// Unregister layer `id`, returning its config.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<LayerConfig> {
        let slot = self.layers.remove(id)?;
        tracing::debug!(layer = %id, "layer removed");
        Some(slot.animator.into_config())
    }

    /// Replace layer `id`'s config. Its timing anchor and smoothing history are kept.
    pub fn update_layer_config(&mut self, id: LayerId, config: LayerConfig) -> HorologeResult<()> {
        let config = sanitized(id, config);
        let slot = self
            .layers
            .get_mut(id)
            .ok_or_else(|| HorologeError::validation(format!("{id} is not registered")))?;
        let was_placeholder = needs_placeholder(slot.animator.config());
        let placeholder = needs_placeholder(&config);
        slot.animator.set_config(config)?;
        if placeholder && !was_placeholder {
            self.record_fallback(id);
        }
        Ok(())
    }

    /// Pin `profile` on layer `id`. It applies from the next tick and survives config updates.
    pub fn set_layer_profile(&mut self, id: LayerId, profile: LayerProfile) -> HorologeResult<()> {
        let slot = self
            .layers
            .get_mut(id)
            .ok_or_else(|| HorologeError::validation(format!("{id} is not registered")))?;
        slot.animator.set_profile(profile);
        Ok(())
    }

    /// Go back to inferring layer `id`'s profile from its config.
    pub fn clear_layer_profile(&mut self, id: LayerId) -> HorologeResult<()> {
        let slot = self
            .layers
            .get_mut(id)
            .ok_or_else(|| HorologeError::validation(format!("{id} is not registered")))?;
        slot.animator.clear_profile();
        Ok(())
    }

    /// Report an asset problem for layer `id`. The layer keeps animating.
    pub fn report_asset_error(&mut self, id: LayerId, message: &str) -> HorologeResult<()> {
        let slot = self
            .layers
            .get_mut(id)
            .ok_or_else(|| HorologeError::validation(format!("{id} is not registered")))?;
        slot.animator.report_asset_error(message);
        let now = self.source.now();
        self.record_error(now, Some(id), message);
        Ok(())
    }

    /// Clock state layer `id` saw on the last productive tick.
    pub fn get_layer_state(&self, id: LayerId) -> Option<ClockState> {
        self.layers.get(id).and_then(|s| s.clock)
    }

    /// Animator of layer `id`, for inspection.
    pub fn layer(&self, id: LayerId) -> Option<&LayerAnimator> {
        self.layers.get(id).map(|s| &s.animator)
    }

    /// Advisory complexity of layer `id`.
    pub fn layer_complexity(&self, id: LayerId) -> Option<&ComplexityReport> {
        self.layer(id).map(LayerAnimator::complexity)
    }

    /// Registered ids in ascending order.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.iter().map(|(id, _)| id)
    }

    /// Telemetry snapshot.
    pub fn status(&self) -> OrchestratorStatus {
        OrchestratorStatus {
            is_running: matches!(
                self.state,
                RunState::Running | RunState::Recovering { .. }
            ),
            state: self.state,
            frame_rate: self.stats.frame_rate(),
            total_frames: self.stats.total_frames(),
            late_frames: self.stats.late_frames(),
            active_layer_count: self
                .layers
                .iter()
                .filter(|(_, s)| s.animator.is_visible())
                .count(),
            errors: self.errors.entries().cloned().collect(),
        }
    }

    /// Advance by one host frame of length `delta`.
    ///
    /// Returns `None` while stopped, paused or waiting out a recovery delay. Otherwise the
    /// master clock is computed exactly once and handed to every layer.
    #[tracing::instrument(level = "trace", skip(self, delta), fields(delta_ms = delta.as_millis() as u64))]
    pub fn tick(&mut self, delta: Duration) -> Option<TickReport> {
        match self.state {
            RunState::Stopped | RunState::Paused => return None,
            RunState::Recovering { remaining } => {
                if delta < remaining {
                    self.state = RunState::Recovering {
                        remaining: remaining - delta,
                    };
                    return None;
                }
                self.state = RunState::Running;
                self.consecutive_failures = 0;
                tracing::info!("orchestrator recovered");
            }
            RunState::Running => {}
        }

        self.stats.record(delta);
        let now = self.source.now();
        let master = ClockTimeProvider::angles(now, self.source.local_offset(), self.opts.hour_mode);
        if let Some(callback) = self.on_frame.as_mut() {
            callback(&master);
        }

        let smoothing = self.opts.smoothing;
        let mut layers = Vec::with_capacity(self.layers.len());
        let mut faults = Vec::new();
        for (id, slot) in self.layers.iter_mut() {
            let clock = layer_clock(
                &master,
                &slot.animator.config().timezone,
                slot.clock.as_ref(),
                smoothing,
            );
            slot.clock = Some(clock);
            if !slot.animator.is_visible() {
                continue;
            }
            let frame = slot.animator.update(Some(&clock), now);
            if let Some(fault) = &frame.fault {
                faults.push((id, fault.clone()));
            }
            layers.push(frame);
        }

        for (id, message) in &faults {
            self.record_error(now, Some(*id), message);
        }
        if faults.is_empty() {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures += 1;
            if self.consecutive_failures >= self.opts.failure_threshold {
                self.trip(now);
            }
        }

        tracing::trace!(layers = layers.len(), failed = faults.len(), "tick");
        Some(TickReport {
            clock: master,
            layers,
            failed_layers: faults.len(),
        })
    }

    /// [`tick`](Self::tick), then hand the frame to `sink` in layer order.
    pub fn tick_into(
        &mut self,
        delta: Duration,
        sink: &mut dyn LayerSink,
    ) -> HorologeResult<Option<TickReport>> {
        let Some(report) = self.tick(delta) else {
            return Ok(None);
        };
        sink.begin_frame(&report.clock)?;
        for frame in &report.layers {
            sink.present(frame)?;
        }
        sink.end_frame()?;
        Ok(Some(report))
    }

    fn trip(&mut self, now: DateTime<Utc>) {
        let message = format!(
            "{} consecutive ticks with failing layers",
            self.consecutive_failures
        );
        tracing::warn!(error = %message, auto_recover = self.opts.auto_recover, "orchestrator failure");
        self.record_error(now, None, &message);
        self.consecutive_failures = 0;
        if self.opts.auto_recover {
            self.state = RunState::Recovering {
                remaining: Duration::from_millis(self.opts.recovery_delay_ms),
            };
            tracing::info!(delay_ms = self.opts.recovery_delay_ms, "orchestrator recovering");
        } else {
            self.state = RunState::Stopped;
            tracing::info!("orchestrator stopped after repeated failures");
        }
    }

    fn record_fallback(&mut self, id: LayerId) {
        let now = self.source.now();
        self.record_error(now, Some(id), "no resolvable image; rendering placeholder");
    }

    fn record_error(&mut self, at: DateTime<Utc>, layer: Option<LayerId>, message: &str) {
        self.errors.push(at, layer, message);
        if let Some(callback) = self.on_error.as_mut() {
            callback(layer, message);
        }
    }
}

fn sanitized(id: LayerId, config: LayerConfig) -> LayerConfig {
    let Sanitized {
        config,
        adjustments,
    } = sanitize_layer(config);
    for issue in &adjustments {
        tracing::debug!(layer = %id, %issue, "layer config adjusted");
    }
    config
}

fn needs_placeholder(config: &LayerConfig) -> bool {
    config.is_shown() && config.is_unresolvable()
}

/// The clock a layer sees: the master state, or its own zone's angles eased from `prev`.
fn layer_clock(
    master: &ClockState,
    tz: &TimezoneConfig,
    prev: Option<&ClockState>,
    smoothing: HandSmoothing,
) -> ClockState {
    if !tz.enabled {
        return *master;
    }
    let mode = if tz.format24h {
        HourMode::TwentyFour
    } else {
        HourMode::Twelve
    };
    let target = ClockTimeProvider::angles_in_zone(master.timestamp, tz.utc_offset, mode);
    match prev {
        None => target,
        Some(prev) => ClockState {
            hour_angle: interpolate_angle(prev.hour_angle, target.hour_angle, smoothing.hour),
            minute_angle: interpolate_angle(
                prev.minute_angle,
                target.minute_angle,
                smoothing.minute,
            ),
            second_angle: interpolate_angle(
                prev.second_angle,
                target.second_angle,
                smoothing.second,
            ),
            timestamp: target.timestamp,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/engine.rs"]
mod tests;
