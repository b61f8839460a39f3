//! Advisory cost estimate for a layer. Read for telemetry only; never changes behavior.

use crate::config::model::{HandType, LayerConfig, RotationSlot};

const FAST_ROTATION_SECS: f64 = 5.0;
const LARGE_SIZE_PCT: f64 = 300.0;

/// Coarse cost bucket.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    /// At most one moving part.
    #[default]
    Low,
    /// One rotation with effects, or both rotations without.
    Medium,
    /// Both rotations plus effects.
    High,
}

/// Cost estimate plus recommendations.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ComplexityReport {
    /// Bucket.
    pub level: ComplexityLevel,
    /// Finer-grained score: 2 per active rotation, 1 per effect, 1 for oversized layers.
    pub score: u32,
    /// Human-readable suggestions.
    pub recommendations: Vec<String>,
}

/// Score a layer's rotation and effect flags.
pub fn assess_complexity(cfg: &LayerConfig) -> ComplexityReport {
    let r1 = cfg.is_slot_active(RotationSlot::Rotation1);
    let r2 = cfg.is_slot_active(RotationSlot::Rotation2);
    let rotations = u32::from(r1) + u32::from(r2);
    let effects = cfg.effects.count();

    let level = match (rotations, effects > 0) {
        (2, true) => ComplexityLevel::High,
        (1, true) | (2, false) => ComplexityLevel::Medium,
        _ => ComplexityLevel::Low,
    };

    let oversized = cfg.size > LARGE_SIZE_PCT;
    let score = rotations * 2 + effects + u32::from(oversized);

    let mut recommendations = Vec::new();
    if cfg.hand_type == HandType::Second && effects > 0 {
        recommendations.push(
            "disable effects on a clock-bound second hand; it repaints every frame".to_string(),
        );
    }
    if rotations == 2 && effects >= 2 {
        recommendations
            .push("drop shadow or glow while the layer both spins and orbits".to_string());
    }
    if cfg.effects.glow && cfg.effects.pulse {
        recommendations.push("glow and pulse both animate the outline; keep one".to_string());
    }
    if effects > 0 {
        for (name, r) in [("rotation1", &cfg.rotation1), ("rotation2", &cfg.rotation2)] {
            if r.enabled && r.speed < FAST_ROTATION_SECS {
                recommendations.push(format!(
                    "{name} turns every {}s; slow it down or drop effects",
                    r.speed
                ));
            }
        }
    }
    if oversized {
        recommendations.push(format!(
            "layer is scaled to {}%; a larger source asset is cheaper",
            cfg.size
        ));
    }

    ComplexityReport {
        level,
        score,
        recommendations,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/complexity.rs"]
mod tests;
