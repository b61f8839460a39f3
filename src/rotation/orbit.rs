use crate::foundation::core::Vec2;
use crate::foundation::math::deg_to_rad;

/// Offset of a point at `angle_deg` on a circle of `radius` around the orbit center.
///
/// 0° is +x (3 o'clock); with y pointing down, 90° is 6 o'clock.
#[inline]
pub fn orbital_offset(radius: f64, angle_deg: f64) -> Vec2 {
    let rad = deg_to_rad(angle_deg);
    Vec2::new(radius * rad.cos(), radius * rad.sin())
}

/// Orbit angle that puts an orbiting layer where a clock hand at `hand_deg` points.
///
/// Hand angles start at 12 o'clock, orbit angles at 3 o'clock.
#[inline]
pub fn orbit_angle_for_hand(hand_deg: f64) -> f64 {
    crate::foundation::math::normalize_360(hand_deg - 90.0)
}

#[cfg(test)]
#[path = "../../tests/unit/rotation/orbit.rs"]
mod tests;
