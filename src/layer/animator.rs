use chrono::{DateTime, Utc};

use crate::clock::time::ClockState;
use crate::config::model::LayerConfig;
use crate::config::profile::LayerProfile;
use crate::foundation::core::LayerId;
use crate::foundation::error::{HorologeError, HorologeResult};
use crate::layer::complexity::{ComplexityLevel, ComplexityReport, assess_complexity};
use crate::rotation::compose::{ComposeCtx, DualRotationComposer, DualRotationResult};

/// Lifecycle of one layer.
///
/// `Uninitialized -> Visible | Hidden -> Animating`, with `Error` on faults and `Fallback`
/// for configs that cannot be resolved at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerPhase {
    /// No config applied yet.
    #[default]
    Uninitialized,
    /// Shown, not yet animated.
    Visible,
    /// `display` or `render` is off.
    Hidden,
    /// Producing transforms every frame.
    Animating,
    /// Last frame faulted; computation continues.
    Error,
    /// Unresolvable config; renders a neutral placeholder.
    Fallback,
}

/// One layer's output for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerFrame {
    /// Layer index, also z-order.
    pub layer: LayerId,
    /// Phase after this frame.
    pub phase: LayerPhase,
    /// Composed rotations; identity on faults and in fallback.
    pub result: DualRotationResult,
    /// CSS `transform` value.
    pub transform: String,
    /// CSS `transform-origin` value.
    pub origin: String,
    /// Advisory cost bucket.
    pub complexity: ComplexityLevel,
    /// Computation fault hit this frame, if any.
    pub fault: Option<String>,
}

impl LayerFrame {
    fn new(
        layer: LayerId,
        phase: LayerPhase,
        result: DualRotationResult,
        complexity: ComplexityLevel,
        fault: Option<String>,
    ) -> Self {
        Self {
            layer,
            phase,
            transform: result.css_transform(),
            origin: result.origin.to_string(),
            result,
            complexity,
            fault,
        }
    }
}

/// Receives `(layer, message)` for faults reported by an animator.
pub type ErrorHandler = Box<dyn FnMut(LayerId, &str)>;

/// Per-layer state machine around [`DualRotationComposer`].
///
/// Faults never escape: computation errors become an identity transform plus a report to the
/// error handler, asset errors are recorded and computation carries on.
pub struct LayerAnimator {
    id: LayerId,
    config: LayerConfig,
    profile: LayerProfile,
    profile_pinned: bool,
    phase: LayerPhase,
    start: Option<DateTime<Utc>>,
    last: DualRotationResult,
    last_error: Option<String>,
    asset_fault: Option<String>,
    complexity: ComplexityReport,
    on_error: Option<ErrorHandler>,
}

impl std::fmt::Debug for LayerAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerAnimator")
            .field("id", &self.id)
            .field("role", &self.profile.role)
            .field("phase", &self.phase)
            .field("start", &self.start)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl LayerAnimator {
    /// Animator for layer `id`. `config.item_layer` must equal `id`.
    pub fn new(id: LayerId, config: LayerConfig) -> HorologeResult<Self> {
        check_id(id, &config)?;
        let complexity = assess_complexity(&config);
        Ok(Self {
            id,
            profile: LayerProfile::infer(&config),
            profile_pinned: false,
            config,
            phase: LayerPhase::Uninitialized,
            start: None,
            last: DualRotationResult::identity(),
            last_error: None,
            asset_fault: None,
            complexity,
            on_error: None,
        })
    }

    /// Use `profile` instead of inferring one from the config.
    pub fn with_profile(mut self, profile: LayerProfile) -> Self {
        self.set_profile(profile);
        self
    }

    /// Pin `profile`; it survives later config changes.
    pub fn set_profile(&mut self, profile: LayerProfile) {
        tracing::debug!(layer = %self.id, role = ?profile.role, "layer profile set");
        self.profile = profile;
        self.profile_pinned = true;
    }

    /// Drop a pinned profile and go back to inferring one from the config.
    pub fn clear_profile(&mut self) {
        self.profile = LayerProfile::infer(&self.config);
        self.profile_pinned = false;
    }

    /// Profile applied on top of the stored config each frame.
    pub fn profile(&self) -> &LayerProfile {
        &self.profile
    }

    /// Install the handler that receives this layer's faults.
    pub fn set_error_handler(&mut self, handler: impl FnMut(LayerId, &str) + 'static) {
        self.on_error = Some(Box::new(handler));
    }

    /// Layer index.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Stored config, as given (profiles apply per frame on top of it).
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Give back the stored config.
    pub fn into_config(self) -> LayerConfig {
        self.config
    }

    /// Current phase.
    pub fn phase(&self) -> LayerPhase {
        self.phase
    }

    /// Most recent composed result.
    pub fn last_result(&self) -> &DualRotationResult {
        &self.last
    }

    /// Most recent fault message, computation or asset.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Advisory complexity of the stored config.
    pub fn complexity(&self) -> &ComplexityReport {
        &self.complexity
    }

    /// Anchor of this layer's own rotations, set on first update.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Whether the layer takes part in rendering.
    pub fn is_visible(&self) -> bool {
        self.config.is_shown()
    }

    /// Re-anchor this layer's rotations at `at`.
    pub fn restart(&mut self, at: DateTime<Utc>) {
        self.start = Some(at);
    }

    /// Replace the config and re-resolve visibility. Keeps the rotation anchor.
    pub fn set_config(&mut self, config: LayerConfig) -> HorologeResult<()> {
        check_id(self.id, &config)?;
        self.complexity = assess_complexity(&config);
        if !self.profile_pinned {
            self.profile = LayerProfile::infer(&config);
        }
        self.config = config;
        self.asset_fault = None;
        self.resolve();
        Ok(())
    }

    /// Record an asset problem. The layer enters `Error` but keeps animating; hidden and
    /// fallback layers keep their phase.
    pub fn report_asset_error(&mut self, message: &str) {
        tracing::warn!(layer = %self.id, error = message, "layer asset error");
        self.asset_fault = Some(message.to_string());
        self.last_error = Some(message.to_string());
        if self.config.is_shown() && !self.config.is_unresolvable() {
            self.phase = LayerPhase::Error;
        }
        self.notify(message);
    }

    /// Apply `config`, then produce this frame.
    pub fn update_layer(
        &mut self,
        config: LayerConfig,
        clock: Option<&ClockState>,
        now: DateTime<Utc>,
    ) -> HorologeResult<LayerFrame> {
        if config != self.config {
            self.set_config(config)?;
        }
        Ok(self.update(clock, now))
    }

    /// Produce this frame's output. `clock` is required for clock-bound layers.
    pub fn update(&mut self, clock: Option<&ClockState>, now: DateTime<Utc>) -> LayerFrame {
        if self.phase == LayerPhase::Uninitialized {
            self.resolve();
        }
        let level = self.complexity.level;

        match self.phase {
            LayerPhase::Hidden | LayerPhase::Fallback => {
                return LayerFrame::new(
                    self.id,
                    self.phase,
                    DualRotationResult::identity(),
                    level,
                    None,
                );
            }
            _ => {}
        }

        let start = *self.start.get_or_insert(now);
        let ctx = ComposeCtx { start, now, clock };
        let composed = {
            let effective = self.profile.apply(&self.config);
            DualRotationComposer::compose(&effective, &ctx)
        };

        match composed {
            Ok(result) => {
                self.last = result;
                self.phase = if self.asset_fault.is_some() {
                    LayerPhase::Error
                } else {
                    LayerPhase::Animating
                };
                LayerFrame::new(self.id, self.phase, result, level, None)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(layer = %self.id, error = %message, "layer computation failed");
                self.last = DualRotationResult::identity();
                self.last_error = Some(message.clone());
                self.phase = LayerPhase::Error;
                self.notify(&message);
                LayerFrame::new(self.id, self.phase, self.last, level, Some(message))
            }
        }
    }

    fn resolve(&mut self) {
        let next = if !self.config.is_shown() {
            LayerPhase::Hidden
        } else if self.config.is_unresolvable() {
            LayerPhase::Fallback
        } else if self.asset_fault.is_some() {
            LayerPhase::Error
        } else {
            LayerPhase::Visible
        };
        if next == LayerPhase::Fallback && self.phase != LayerPhase::Fallback {
            let message = "no resolvable image; rendering placeholder";
            tracing::warn!(layer = %self.id, error = message, "layer entered fallback");
            self.last = DualRotationResult::identity();
            self.notify(message);
        }
        tracing::debug!(layer = %self.id, from = ?self.phase, to = ?next, "layer phase");
        self.phase = next;
    }

    fn notify(&mut self, message: &str) {
        if let Some(handler) = self.on_error.as_mut() {
            handler(self.id, message);
        }
    }
}

fn check_id(id: LayerId, config: &LayerConfig) -> HorologeResult<()> {
    if config.item_layer != id.get() {
        return Err(HorologeError::validation(format!(
            "config itemLayer {} does not match {id}",
            config.item_layer
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layer/animator.rs"]
mod tests;
