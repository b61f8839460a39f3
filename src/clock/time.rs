use chrono::{DateTime, FixedOffset, Offset as _, Timelike as _, Utc};

use crate::clock::source::fixed_offset_from_hours;
use crate::config::model::HandType;
use crate::foundation::math::normalize_360;

/// Lowest accepted UTC offset, in hours.
pub const MIN_UTC_OFFSET_HOURS: f64 = -12.0;
/// Highest accepted UTC offset, in hours.
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// How the hour hand maps a day onto the dial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HourMode {
    /// Two revolutions per day, 12:00 and 00:00 at the top.
    #[default]
    #[serde(rename = "12h")]
    Twelve,
    /// One revolution per day, 12:00 at the top and midnight at the bottom.
    #[serde(rename = "24h")]
    TwentyFour,
}

/// Hand angles for one instant, all in `[0, 360)`, 0 = 12 o'clock, clockwise.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClockState {
    /// Hour hand angle in degrees.
    pub hour_angle: f64,
    /// Minute hand angle in degrees.
    pub minute_angle: f64,
    /// Second hand angle in degrees.
    pub second_angle: f64,
    /// Instant the angles were computed for.
    pub timestamp: DateTime<Utc>,
}

impl ClockState {
    /// Angle of the hand a layer is bound to, or `None` for unbound layers.
    pub fn hand_angle(&self, hand: HandType) -> Option<f64> {
        match hand {
            HandType::Hour => Some(self.hour_angle),
            HandType::Minute => Some(self.minute_angle),
            HandType::Second => Some(self.second_angle),
            HandType::None => None,
        }
    }
}

/// Converts instants into hand angles.
pub struct ClockTimeProvider;

impl ClockTimeProvider {
    /// Hand angles for `ts` as seen in the zone `offset`.
    pub fn angles(ts: DateTime<Utc>, offset: FixedOffset, mode: HourMode) -> ClockState {
        let local = ts.with_timezone(&offset);
        let hours = f64::from(local.hour());
        let minutes = f64::from(local.minute());
        let millis = f64::from(local.timestamp_subsec_millis().min(999));
        let seconds = f64::from(local.second()) + millis / 1000.0;

        let second_fraction = seconds / 60.0;
        let second_angle = normalize_360(second_fraction * 360.0);
        let minute_angle = normalize_360((minutes + second_fraction) / 60.0 * 360.0);
        let hour_angle = match mode {
            HourMode::Twelve => {
                let total = (hours % 12.0) * 60.0 + minutes + second_fraction;
                normalize_360(total / 720.0 * 360.0)
            }
            HourMode::TwentyFour => {
                let total = hours * 60.0 + minutes + second_fraction;
                normalize_360((total - 720.0) / 1440.0 * 360.0)
            }
        };

        ClockState {
            hour_angle,
            minute_angle,
            second_angle,
            timestamp: ts,
        }
    }

    /// Hand angles for `ts` in the zone `UTC + utc_offset_hours`.
    ///
    /// Equivalent to shifting the local reading by `(utc_offset_hours - local offset)`. The
    /// offset is clamped into `-12..=14`; non-finite offsets read as UTC.
    pub fn angles_in_zone(ts: DateTime<Utc>, utc_offset_hours: f64, mode: HourMode) -> ClockState {
        let hours = if utc_offset_hours.is_finite() {
            utc_offset_hours.clamp(MIN_UTC_OFFSET_HOURS, MAX_UTC_OFFSET_HOURS)
        } else {
            0.0
        };
        let offset = fixed_offset_from_hours(hours).unwrap_or_else(|_| Utc.fix());
        Self::angles(ts, offset, mode)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/time.rs"]
mod tests;
