//! Angle math: normalization, conversion and interpolation in degrees.

use crate::foundation::core::Point;

/// Map any angle into `[0, 360)`.
#[inline]
pub fn normalize_360(deg: f64) -> f64 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

/// Map any angle into `(-180, 180]`, for signed deltas.
#[inline]
pub fn normalize_180(deg: f64) -> f64 {
    let a = normalize_360(deg);
    if a > 180.0 { a - 360.0 } else { a }
}

/// Move `factor` of the way from `from` to `to` along the shortest arc.
///
/// The result is normalized into `[0, 360)`, so `359 -> 1` advances through `0`
/// instead of sweeping back across the dial.
#[inline]
pub fn interpolate_angle(from: f64, to: f64, factor: f64) -> f64 {
    let delta = normalize_180(to - from);
    normalize_360(from + delta * factor)
}

#[inline]
/// Degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

#[inline]
/// Radians to degrees.
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

#[inline]
/// Clamp `x` into `[lo, hi]`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.clamp(lo, hi)
}

#[inline]
/// Unclamped linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
