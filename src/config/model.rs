//! Declarative layer configuration.
//!
//! A [`LayerConfig`] is a pure data model deserialized from JSON (camelCase field names). It is
//! never mutated by the engine: every frame recomputes the layer transform from the config and
//! the current time.

/// Which clock hand, if any, drives a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandType {
    /// Hour hand.
    Hour,
    /// Minute hand.
    Minute,
    /// Second hand.
    Second,
    /// Decorative layer, driven by elapsed session time.
    #[default]
    None,
}

/// One of the two rotation mechanisms on a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RotationSlot {
    /// Self-spin around the layer's own pivot.
    #[default]
    Rotation1,
    /// Orbit of the layer's pivot around a separate center.
    Rotation2,
}

/// Spin direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increasing angle.
    #[default]
    Clockwise,
    /// Decreasing angle.
    Counterclockwise,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::Counterclockwise => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// One rotation mechanism.
///
/// Field meaning depends on the slot:
///
/// | field                 | rotation1                                | rotation2                              |
/// |-----------------------|------------------------------------------|----------------------------------------|
/// | `axis_x`, `axis_y`    | spin pivot, % of the layer box           | orbit center offset from the reference |
/// | `position_x`          | static x offset from the reference point | orbit radius                           |
/// | `position_y`          | static y offset from the reference point | starting angle, 0 = 3 o'clock          |
pub struct RotationConfig {
    /// Whether this rotation animates.
    pub enabled: bool,
    /// Seconds per full revolution.
    pub speed: f64,
    /// Spin direction.
    pub direction: Direction,
    /// Pivot (rotation1) or orbit center (rotation2), x.
    pub axis_x: f64,
    /// Pivot (rotation1) or orbit center (rotation2), y.
    pub axis_y: f64,
    /// Static x offset (rotation1) or orbit radius (rotation2).
    pub position_x: f64,
    /// Static y offset (rotation1) or starting angle in degrees (rotation2).
    pub position_y: f64,
    /// Angle used while `enabled` is false.
    pub static_angle: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 60.0,
            direction: Direction::Clockwise,
            axis_x: 50.0,
            axis_y: 50.0,
            position_x: 0.0,
            position_y: 0.0,
            static_angle: 0.0,
        }
    }
}

impl RotationConfig {
    /// Disabled orbit centered on the reference point, the rotation2 default.
    pub fn orbit() -> Self {
        Self {
            axis_x: 0.0,
            axis_y: 0.0,
            ..Self::default()
        }
    }

    /// Spin direction while enabled, `None` when the rotation is off.
    pub fn active_direction(&self) -> Option<Direction> {
        self.enabled.then_some(self.direction)
    }

    /// Orbit radius (rotation2 reading of `position_x`).
    pub fn radius(&self) -> f64 {
        self.position_x
    }

    /// Starting orbit angle (rotation2 reading of `position_y`).
    pub fn start_angle(&self) -> f64 {
        self.position_y
    }
}

/// Per-layer timezone binding.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimezoneConfig {
    /// Read the clock in `utc_offset` instead of the display's local zone.
    pub enabled: bool,
    /// Hours east of UTC, `-12..=14`, fractional allowed.
    pub utc_offset: f64,
    /// One hour-hand revolution per day instead of two.
    pub format24h: bool,
}

/// Visual effect switches. Opaque to the engine; passed through to the renderer and read by
/// the complexity assessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectFlags {
    /// Drop shadow.
    pub shadow: bool,
    /// Outer glow.
    pub glow: bool,
    /// Reduced opacity.
    pub transparent: bool,
    /// Pulsing scale/opacity.
    pub pulse: bool,
}

impl EffectFlags {
    /// Number of switched-on effects.
    pub fn count(self) -> u32 {
        [self.shadow, self.glow, self.transparent, self.pulse]
            .into_iter()
            .filter(|on| *on)
            .count() as u32
    }

    /// Whether any effect is on.
    pub fn any(self) -> bool {
        self.count() > 0
    }
}

/// Declarative configuration of one layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerConfig {
    /// Stable short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Asset reference, opaque to the engine. Blank means unresolvable.
    pub image: String,
    /// Layer index and z-order, `1..=20`, unique in a set.
    pub item_layer: u8,
    /// User-facing visibility switch.
    pub display: bool,
    /// Renderer-facing visibility switch.
    pub render: bool,
    /// Scale in percent, `1..=1000`.
    pub size: f64,
    /// Clock hand driving this layer.
    pub hand_type: HandType,
    /// Which rotation slot the clock drives.
    pub hand_rotation: RotationSlot,
    /// Per-layer timezone.
    pub timezone: TimezoneConfig,
    /// Effect switches.
    #[serde(flatten)]
    pub effects: EffectFlags,
    /// Self-spin.
    pub rotation1: RotationConfig,
    /// Orbit. The center defaults to the reference point whether or not the object is given.
    #[serde(deserialize_with = "deserialize_orbit")]
    pub rotation2: RotationConfig,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            image: String::new(),
            item_layer: 1,
            display: true,
            render: true,
            size: 100.0,
            hand_type: HandType::None,
            hand_rotation: RotationSlot::Rotation1,
            timezone: TimezoneConfig::default(),
            effects: EffectFlags::default(),
            rotation1: RotationConfig::default(),
            rotation2: RotationConfig::orbit(),
        }
    }
}

impl LayerConfig {
    /// Both visibility switches are on.
    pub fn is_shown(&self) -> bool {
        self.display && self.render
    }

    /// The slot driven by the clock, if the layer is bound to a hand.
    pub fn clock_slot(&self) -> Option<RotationSlot> {
        (self.hand_type != HandType::None).then_some(self.hand_rotation)
    }

    /// Whether the layer follows the clock.
    pub fn is_clock_bound(&self) -> bool {
        self.clock_slot().is_some()
    }

    /// Rotation config for `slot`.
    pub fn rotation(&self, slot: RotationSlot) -> &RotationConfig {
        match slot {
            RotationSlot::Rotation1 => &self.rotation1,
            RotationSlot::Rotation2 => &self.rotation2,
        }
    }

    /// Whether `slot` moves this layer, either from its own config or from the clock.
    pub fn is_slot_active(&self, slot: RotationSlot) -> bool {
        self.rotation(slot).enabled || self.clock_slot() == Some(slot)
    }

    /// The asset reference is blank and cannot be resolved.
    pub fn is_unresolvable(&self) -> bool {
        self.image.trim().is_empty()
    }
}

/// `rotation2` as written: the orbit center is a pixel offset, so missing axes mean `0`.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrbitDoc {
    axis_x: Option<f64>,
    axis_y: Option<f64>,
    #[serde(flatten)]
    rest: RotationConfig,
}

fn deserialize_orbit<'de, D>(deserializer: D) -> Result<RotationConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let doc = <OrbitDoc as serde::Deserialize>::deserialize(deserializer)?;
    let base = RotationConfig::orbit();
    Ok(RotationConfig {
        axis_x: doc.axis_x.unwrap_or(base.axis_x),
        axis_y: doc.axis_y.unwrap_or(base.axis_y),
        ..doc.rest
    })
}

/// A layer set document: a bare array or `{ "layers": [...] }`.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum LayerSetDoc {
    Bare(Vec<LayerConfig>),
    Wrapped { layers: Vec<LayerConfig> },
}

impl LayerSetDoc {
    pub(crate) fn into_layers(self) -> Vec<LayerConfig> {
        match self {
            Self::Bare(v) | Self::Wrapped { layers: v } => v,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
