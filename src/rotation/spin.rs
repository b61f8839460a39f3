use chrono::{DateTime, Utc};

use crate::config::model::Direction;
use crate::foundation::math::normalize_360;

/// Spin angle after `elapsed_secs` of rotation.
///
/// `direction == None` (rotation off) or a non-positive speed returns `initial` unchanged.
/// Otherwise the angle advances `360 / speed_secs` degrees per second in `direction` and is
/// normalized into `[0, 360)`.
#[inline]
pub fn spin_angle_for_elapsed(
    elapsed_secs: f64,
    speed_secs: f64,
    direction: Option<Direction>,
    initial: f64,
) -> f64 {
    let Some(direction) = direction else {
        return initial;
    };
    if speed_secs.is_nan() || speed_secs <= 0.0 {
        return initial;
    }
    let degrees_per_sec = 360.0 / speed_secs;
    normalize_360(initial + direction.sign() * elapsed_secs * degrees_per_sec)
}

/// Spin angle at `now` for a rotation that started at `start`.
///
/// Elapsed time is taken at millisecond resolution.
pub fn spin_angle(
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    speed_secs: f64,
    direction: Option<Direction>,
    initial: f64,
) -> f64 {
    let elapsed_secs = (now - start).num_milliseconds() as f64 / 1000.0;
    spin_angle_for_elapsed(elapsed_secs, speed_secs, direction, initial)
}

#[cfg(test)]
#[path = "../../tests/unit/rotation/spin.rs"]
mod tests;
