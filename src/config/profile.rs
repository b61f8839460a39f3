//! Layer profiles: data-driven override rules applied to a config before composition.
//!
//! A profile never changes the stored [`LayerConfig`]; [`LayerProfile::apply`] yields the
//! effective config for one frame.

use std::borrow::Cow;

use crate::config::model::{HandType, LayerConfig, RotationConfig};

/// Speed buckets used by [`ProfileRules::quantize_speed`] when none are given.
pub const DEFAULT_SPEED_BUCKETS: &[f64] = &[
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 1800.0, 3600.0, 7200.0, 21600.0,
    43200.0, 86400.0, 604800.0,
];

/// What a layer is for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// Clock hand. The clock-driven slot ignores its own speed and direction.
    Hand,
    /// Orbits only: rotation1 is switched off while rotation2 runs.
    OrbitalSpecialist,
    /// Spins only: rotation2 is switched off while rotation1 runs.
    SpinSpecialist,
    /// No overrides.
    #[default]
    Generic,
}

/// Optional tuning rules. Thresholds are tunable defaults, not contract.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProfileRules {
    /// Snap enabled rotation speeds to the nearest of these buckets.
    pub quantize_speed: Option<Vec<f64>>,
    /// Switch pulse off when glow is on.
    pub pulse_yields_to_glow: bool,
}

/// Role plus rules for one layer.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerProfile {
    /// Layer role.
    pub role: LayerRole,
    /// Extra rules.
    pub rules: ProfileRules,
}

impl LayerProfile {
    /// Profile with `role` and no extra rules.
    pub fn new(role: LayerRole) -> Self {
        Self {
            role,
            rules: ProfileRules::default(),
        }
    }

    /// Guess the role from the config alone.
    pub fn infer(cfg: &LayerConfig) -> Self {
        let role = match (
            cfg.hand_type != HandType::None,
            cfg.rotation1.enabled,
            cfg.rotation2.enabled,
        ) {
            (true, _, _) => LayerRole::Hand,
            (false, false, true) => LayerRole::OrbitalSpecialist,
            (false, true, false) => LayerRole::SpinSpecialist,
            _ => LayerRole::Generic,
        };
        Self::new(role)
    }

    /// Effective config after this profile's overrides. Borrows when nothing changes.
    pub fn apply<'a>(&self, cfg: &'a LayerConfig) -> Cow<'a, LayerConfig> {
        let mut out = Cow::Borrowed(cfg);

        match self.role {
            LayerRole::OrbitalSpecialist if cfg.rotation1.enabled && cfg.rotation2.enabled => {
                out.to_mut().rotation1.enabled = false;
            }
            LayerRole::SpinSpecialist if cfg.rotation1.enabled && cfg.rotation2.enabled => {
                out.to_mut().rotation2.enabled = false;
            }
            _ => {}
        }

        if self.rules.pulse_yields_to_glow && cfg.effects.glow && cfg.effects.pulse {
            out.to_mut().effects.pulse = false;
        }

        if let Some(buckets) = &self.rules.quantize_speed {
            let buckets = if buckets.is_empty() {
                DEFAULT_SPEED_BUCKETS
            } else {
                buckets.as_slice()
            };
            let s1 = snapped_speed(&out.rotation1, buckets);
            let s2 = snapped_speed(&out.rotation2, buckets);
            if let Some(speed) = s1 {
                out.to_mut().rotation1.speed = speed;
            }
            if let Some(speed) = s2 {
                out.to_mut().rotation2.speed = speed;
            }
        }

        out
    }
}

fn snapped_speed(r: &RotationConfig, buckets: &[f64]) -> Option<f64> {
    if !r.enabled {
        return None;
    }
    let snapped = nearest_bucket(r.speed, buckets);
    (snapped != r.speed).then_some(snapped)
}

fn nearest_bucket(speed: f64, buckets: &[f64]) -> f64 {
    buckets
        .iter()
        .copied()
        .filter(|b| b.is_finite() && *b > 0.0)
        .min_by(|a, b| (a - speed).abs().total_cmp(&(b - speed).abs()))
        .unwrap_or(speed)
}

#[cfg(test)]
#[path = "../../tests/unit/config/profile.rs"]
mod tests;
