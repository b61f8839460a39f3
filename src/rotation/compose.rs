use std::fmt;

use chrono::{DateTime, Utc};

use crate::clock::time::ClockState;
use crate::config::model::{LayerConfig, RotationConfig, RotationSlot};
use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{HorologeError, HorologeResult};
use crate::foundation::math::{deg_to_rad, normalize_360};
use crate::rotation::orbit::{orbit_angle_for_hand, orbital_offset};
use crate::rotation::spin::spin_angle;

/// Inputs that vary per frame.
#[derive(Clone, Copy, Debug)]
pub struct ComposeCtx<'a> {
    /// When this layer's rotations started.
    pub start: DateTime<Utc>,
    /// Frame instant.
    pub now: DateTime<Utc>,
    /// Clock angles for this layer (already zone-shifted and smoothed). Required for
    /// clock-bound layers.
    pub clock: Option<&'a ClockState>,
}

/// Point around which rotation is anchored, in percent of the layer box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformOrigin {
    /// Horizontal position, percent.
    pub x_pct: f64,
    /// Vertical position, percent.
    pub y_pct: f64,
}

impl TransformOrigin {
    /// The layer's own center.
    pub const CENTER: Self = Self {
        x_pct: 50.0,
        y_pct: 50.0,
    };
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::CENTER
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", self.x_pct, self.y_pct)
    }
}

/// Composed, ready-to-apply output for one layer and one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DualRotationResult {
    /// Spin angle in `[0, 360)`.
    pub rotation1_angle: f64,
    /// Orbit angle in `[0, 360)` (0 = 3 o'clock).
    pub rotation2_angle: f64,
    /// Rotation1's static offset from the reference point.
    pub static_position: Vec2,
    /// Rotation2's offset: orbit center plus the point on the circle. Zero when inactive.
    pub orbit_offset: Vec2,
    /// Where the layer's pivot lands relative to the reference point.
    pub final_position: Point,
    /// `size / 100`.
    pub scale: f64,
    /// `translate(static) * rotate(rotation1)`.
    pub rotation1_transform: Affine,
    /// `translate(orbit_offset)`.
    pub rotation2_transform: Affine,
    /// `translate(static) * translate(orbit) * rotate(rotation1) * scale`.
    pub combined_transform: Affine,
    /// Anchor for the rotation.
    pub origin: TransformOrigin,
}

impl DualRotationResult {
    /// Neutral pose: no offset, no rotation, unit scale, centered origin.
    pub fn identity() -> Self {
        Self {
            rotation1_angle: 0.0,
            rotation2_angle: 0.0,
            static_position: Vec2::ZERO,
            orbit_offset: Vec2::ZERO,
            final_position: Point::ORIGIN,
            scale: 1.0,
            rotation1_transform: Affine::IDENTITY,
            rotation2_transform: Affine::IDENTITY,
            combined_transform: Affine::IDENTITY,
            origin: TransformOrigin::CENTER,
        }
    }

    /// CSS `transform` value for the rendering collaborator.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.3}px, {:.3}px) translate({:.3}px, {:.3}px) rotate({:.3}deg) scale({:.4})",
            self.static_position.x,
            self.static_position.y,
            self.orbit_offset.x,
            self.orbit_offset.y,
            self.rotation1_angle,
            self.scale,
        )
    }
}

/// Stateless composer from layer config + time to a [`DualRotationResult`].
pub struct DualRotationComposer;

impl DualRotationComposer {
    /// Compose both rotations of `cfg` for one frame.
    ///
    /// Clock-bound layers take the live hand angle for the clock slot; the other slot runs
    /// from its own config. Rotation2 translates the pivot along its orbit, rotation1 spins
    /// the layer around that pivot.
    #[tracing::instrument(level = "trace", skip(cfg, ctx), fields(layer = cfg.item_layer))]
    pub fn compose(cfg: &LayerConfig, ctx: &ComposeCtx<'_>) -> HorologeResult<DualRotationResult> {
        check_inputs(cfg)?;

        let hand_angle = match cfg.clock_slot() {
            Some(slot) => {
                let clock = ctx.clock.ok_or_else(|| {
                    HorologeError::computation("clock-bound layer composed without a clock state")
                })?;
                let angle = clock.hand_angle(cfg.hand_type).ok_or_else(|| {
                    HorologeError::computation("clock slot set without a hand type")
                })?;
                if !angle.is_finite() {
                    return Err(HorologeError::computation("clock hand angle is not finite"));
                }
                Some((slot, angle))
            }
            None => None,
        };

        let r1 = &cfg.rotation1;
        let r2 = &cfg.rotation2;

        let rotation1_angle = match hand_angle {
            Some((RotationSlot::Rotation1, hand)) => normalize_360(hand),
            _ if r1.enabled => normalize_360(spin_angle(
                ctx.start,
                ctx.now,
                r1.speed,
                r1.active_direction(),
                0.0,
            )),
            _ => normalize_360(r1.static_angle),
        };

        let (rotation2_angle, orbit_offset) = match hand_angle {
            Some((RotationSlot::Rotation2, hand)) => {
                let angle = orbit_angle_for_hand(hand);
                (angle, orbit_position(r2, angle))
            }
            _ if r2.enabled => {
                let angle = normalize_360(spin_angle(
                    ctx.start,
                    ctx.now,
                    r2.speed,
                    r2.active_direction(),
                    r2.start_angle(),
                ));
                (angle, orbit_position(r2, angle))
            }
            _ => (normalize_360(r2.static_angle), Vec2::ZERO),
        };

        let static_position = Vec2::new(r1.position_x, r1.position_y);
        let scale = cfg.size / 100.0;

        let rotate = Affine::rotate(deg_to_rad(rotation1_angle));
        let rotation1_transform = Affine::translate(static_position) * rotate;
        let rotation2_transform = Affine::translate(orbit_offset);
        let combined_transform = Affine::translate(static_position)
            * Affine::translate(orbit_offset)
            * rotate
            * Affine::scale(scale);

        let origin = if cfg.is_slot_active(RotationSlot::Rotation2) {
            TransformOrigin::CENTER
        } else if cfg.is_slot_active(RotationSlot::Rotation1) {
            TransformOrigin {
                x_pct: r1.axis_x,
                y_pct: r1.axis_y,
            }
        } else {
            TransformOrigin::CENTER
        };

        let out = DualRotationResult {
            rotation1_angle,
            rotation2_angle,
            static_position,
            orbit_offset,
            final_position: (static_position + orbit_offset).to_point(),
            scale,
            rotation1_transform,
            rotation2_transform,
            combined_transform,
            origin,
        };
        check_output(&out)?;
        Ok(out)
    }
}

fn orbit_position(r2: &RotationConfig, angle: f64) -> Vec2 {
    Vec2::new(r2.axis_x, r2.axis_y) + orbital_offset(r2.radius(), angle)
}

fn check_inputs(cfg: &LayerConfig) -> HorologeResult<()> {
    if !cfg.size.is_finite() || cfg.size <= 0.0 {
        return Err(HorologeError::computation(format!(
            "size {} is not a positive finite number",
            cfg.size
        )));
    }
    check_rotation("rotation1", &cfg.rotation1)?;
    check_rotation("rotation2", &cfg.rotation2)
}

fn check_rotation(name: &str, r: &RotationConfig) -> HorologeResult<()> {
    let fields = [
        ("axisX", r.axis_x),
        ("axisY", r.axis_y),
        ("positionX", r.position_x),
        ("positionY", r.position_y),
        ("staticAngle", r.static_angle),
    ];
    for (field, v) in fields {
        if !v.is_finite() {
            return Err(HorologeError::computation(format!(
                "{name}.{field} is not finite"
            )));
        }
    }
    if r.enabled && !r.speed.is_finite() {
        return Err(HorologeError::computation(format!(
            "{name}.speed is not finite"
        )));
    }
    Ok(())
}

fn check_output(out: &DualRotationResult) -> HorologeResult<()> {
    let coeffs = out.combined_transform.as_coeffs();
    if coeffs.iter().all(|c| c.is_finite()) && out.rotation2_angle.is_finite() {
        Ok(())
    } else {
        Err(HorologeError::computation(
            "composed transform is not finite",
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotation/compose.rs"]
mod tests;
