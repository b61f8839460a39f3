//! Typed sanitize + validate step between raw JSON and the engine.
//!
//! Two kinds of findings:
//! - adjustments: a field was out of range or non-finite and was replaced by policy
//!   (see [`sanitize_layer`]); the layer is still usable.
//! - errors: the set cannot be accepted as-is (see [`validate_layer_set`]).

use std::collections::HashMap;
use std::fmt;

use crate::clock::time::{MAX_UTC_OFFSET_HOURS, MIN_UTC_OFFSET_HOURS};
use crate::config::model::{LayerConfig, LayerSetDoc, RotationConfig};
use crate::foundation::core::{LayerId, MAX_LAYERS};
use crate::foundation::error::HorologeResult;

/// Smallest accepted layer size, percent.
pub const MIN_SIZE: f64 = 1.0;
/// Largest accepted layer size, percent.
pub const MAX_SIZE: f64 = 1000.0;
/// Fastest accepted rotation, seconds per revolution.
pub const MIN_SPEED: f64 = 1.0;
/// Slowest accepted rotation (one week), seconds per revolution.
pub const MAX_SPEED: f64 = 604_800.0;

const FALLBACK_SIZE: f64 = 100.0;
const FALLBACK_SPEED: f64 = 60.0;

/// One step in a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElem {
    /// Object field.
    Field(&'static str),
    /// Array index.
    Index(usize),
}

/// A finding at a JSON path.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// Location, rendered as `$[2].rotation1.speed`.
    pub path: Vec<PathElem>,
    /// Human-readable description.
    pub message: String,
}

impl ConfigIssue {
    /// Build an issue at `path`.
    pub fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every hard error found in a layer set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigErrors {
    /// Errors in document order.
    pub errors: Vec<ConfigIssue>,
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

/// A layer with every field inside its safe range, plus what had to change.
#[derive(Debug, Clone)]
pub struct Sanitized {
    /// Usable configuration.
    pub config: LayerConfig,
    /// Fields that were replaced or clamped.
    pub adjustments: Vec<ConfigIssue>,
}

/// Clamp and default every numeric field of one layer.
///
/// Policy: size `1..=1000` (non-finite reads 100), speeds `1..=604800` (non-finite reads 60),
/// UTC offset `-12..=14` (non-finite reads 0), non-finite axes read 50, non-finite positions and
/// static angles read 0.
pub fn sanitize_layer(config: LayerConfig) -> Sanitized {
    let mut adjustments = Vec::new();
    let config = sanitize_at(config, &mut Vec::new(), &mut adjustments);
    Sanitized {
        config,
        adjustments,
    }
}

fn sanitize_at(
    mut cfg: LayerConfig,
    path: &mut Vec<PathElem>,
    out: &mut Vec<ConfigIssue>,
) -> LayerConfig {
    cfg.size = clamp_field(
        cfg.size,
        MIN_SIZE,
        MAX_SIZE,
        FALLBACK_SIZE,
        path,
        "size",
        out,
    );

    path.push(PathElem::Field("timezone"));
    cfg.timezone.utc_offset = clamp_field(
        cfg.timezone.utc_offset,
        MIN_UTC_OFFSET_HOURS,
        MAX_UTC_OFFSET_HOURS,
        0.0,
        path,
        "utcOffset",
        out,
    );
    path.pop();

    path.push(PathElem::Field("rotation1"));
    sanitize_rotation(&mut cfg.rotation1, RotationConfig::default(), path, out);
    path.pop();
    path.push(PathElem::Field("rotation2"));
    sanitize_rotation(&mut cfg.rotation2, RotationConfig::orbit(), path, out);
    path.pop();

    cfg
}

/// Non-finite axes fall back to `base`'s, the slot's serde default.
fn sanitize_rotation(
    r: &mut RotationConfig,
    base: RotationConfig,
    path: &mut Vec<PathElem>,
    out: &mut Vec<ConfigIssue>,
) {
    r.speed = clamp_field(
        r.speed,
        MIN_SPEED,
        MAX_SPEED,
        FALLBACK_SPEED,
        path,
        "speed",
        out,
    );
    r.axis_x = finite_field(r.axis_x, base.axis_x, path, "axisX", out);
    r.axis_y = finite_field(r.axis_y, base.axis_y, path, "axisY", out);
    r.position_x = finite_field(r.position_x, 0.0, path, "positionX", out);
    r.position_y = finite_field(r.position_y, 0.0, path, "positionY", out);
    r.static_angle = finite_field(r.static_angle, 0.0, path, "staticAngle", out);
}

fn clamp_field(
    v: f64,
    lo: f64,
    hi: f64,
    fallback: f64,
    path: &mut Vec<PathElem>,
    field: &'static str,
    out: &mut Vec<ConfigIssue>,
) -> f64 {
    let v = finite_field(v, fallback, path, field, out);
    let clamped = v.clamp(lo, hi);
    if clamped != v {
        path.push(PathElem::Field(field));
        out.push(ConfigIssue::at(
            path,
            format!("{v} is outside {lo}..={hi}, clamped to {clamped}"),
        ));
        path.pop();
    }
    clamped
}

fn finite_field(
    v: f64,
    fallback: f64,
    path: &mut Vec<PathElem>,
    field: &'static str,
    out: &mut Vec<ConfigIssue>,
) -> f64 {
    if v.is_finite() {
        return v;
    }
    path.push(PathElem::Field(field));
    out.push(ConfigIssue::at(
        path,
        format!("non-finite value replaced by {fallback}"),
    ));
    path.pop();
    fallback
}

/// Reject sets that cannot be laid out: ids outside `1..=20`, duplicate ids, more than 20 layers.
///
/// All errors are collected.
pub fn validate_layer_set(layers: &[LayerConfig]) -> Result<(), ConfigErrors> {
    let mut errors = Vec::new();

    if layers.len() > MAX_LAYERS {
        errors.push(ConfigIssue::at(
            &[],
            format!("{} layers given, at most {MAX_LAYERS} allowed", layers.len()),
        ));
    }

    let mut first_seen = HashMap::<u8, usize>::new();
    for (i, layer) in layers.iter().enumerate() {
        let path = [PathElem::Index(i), PathElem::Field("itemLayer")];
        if LayerId::new(layer.item_layer).is_err() {
            errors.push(ConfigIssue::at(
                &path,
                format!("{} is outside 1..={MAX_LAYERS}", layer.item_layer),
            ));
            continue;
        }
        if let Some(prev) = first_seen.insert(layer.item_layer, i) {
            errors.push(ConfigIssue::at(
                &path,
                format!(
                    "itemLayer {} already used by layer at index {prev}",
                    layer.item_layer
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigErrors { errors })
    }
}

/// A validated layer set, ready for the orchestrator.
#[derive(Debug, Clone)]
pub struct ValidatedLayers {
    /// Sanitized layers in document order.
    pub layers: Vec<LayerConfig>,
    /// Every sanitize adjustment, with set-level paths.
    pub adjustments: Vec<ConfigIssue>,
}

impl ValidatedLayers {
    /// Layers paired with their ids.
    pub fn with_ids(&self) -> impl Iterator<Item = (LayerId, &LayerConfig)> {
        self.layers
            .iter()
            .filter_map(|l| LayerId::new(l.item_layer).ok().map(|id| (id, l)))
    }
}

/// Sanitize then validate a whole set.
pub fn sanitize_layer_set(layers: Vec<LayerConfig>) -> Result<ValidatedLayers, ConfigErrors> {
    let mut adjustments = Vec::new();
    let layers: Vec<LayerConfig> = layers
        .into_iter()
        .enumerate()
        .map(|(i, l)| sanitize_at(l, &mut vec![PathElem::Index(i)], &mut adjustments))
        .collect();
    validate_layer_set(&layers)?;
    Ok(ValidatedLayers {
        layers,
        adjustments,
    })
}

/// Deserialize, sanitize and validate a layer set document.
///
/// Accepts a bare JSON array or `{ "layers": [...] }`.
pub fn parse_layer_set(json: &str) -> HorologeResult<ValidatedLayers> {
    let doc: LayerSetDoc = serde_json::from_str(json)?;
    Ok(sanitize_layer_set(doc.into_layers())?)
}

#[cfg(test)]
#[path = "../../tests/unit/config/validate.rs"]
mod tests;
