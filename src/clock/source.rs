use chrono::{DateTime, Duration, FixedOffset, Local, Offset as _, Utc};

use crate::foundation::error::{HorologeError, HorologeResult};

/// Where the engine reads "now" from.
///
/// The orchestrator never touches the system clock directly, so hosts and tests can drive it
/// with any timeline they like.
pub trait TimeSource {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
    /// Offset of the display's local zone, used for layers without their own timezone.
    fn local_offset(&self) -> FixedOffset;
}

/// Wall clock plus the host's local zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// Explicitly driven time, for tests and offline simulation.
#[derive(Clone, Copy, Debug)]
pub struct ManualTimeSource {
    now: DateTime<Utc>,
    local_offset: FixedOffset,
}

impl ManualTimeSource {
    /// Start at `now` with a UTC local zone.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            local_offset: Utc.fix(),
        }
    }

    /// Use `hours` (may be fractional) as the local zone offset.
    pub fn with_local_offset_hours(mut self, hours: f64) -> HorologeResult<Self> {
        self.local_offset = fixed_offset_from_hours(hours)?;
        Ok(self)
    }

    /// Jump to an absolute instant.
    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Move forward (or backward, for negative durations). A step past chrono's
    /// representable range leaves the time unchanged.
    pub fn advance(&mut self, by: Duration) {
        if let Some(next) = self.now.checked_add_signed(by) {
            self.now = next;
        }
    }

    /// Move forward by a std duration, as handed over by frame callbacks.
    pub fn advance_std(&mut self, by: std::time::Duration) {
        self.advance(Duration::from_std(by).unwrap_or(Duration::zero()));
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_offset(&self) -> FixedOffset {
        self.local_offset
    }
}

/// Convert a (possibly fractional) UTC offset in hours into a chrono offset.
///
/// Offsets are rounded to whole seconds and must lie strictly inside one day.
pub fn fixed_offset_from_hours(hours: f64) -> HorologeResult<FixedOffset> {
    if !hours.is_finite() {
        return Err(HorologeError::validation("utc offset must be finite"));
    }
    let secs = (hours * 3600.0).round();
    FixedOffset::east_opt(secs as i32).ok_or_else(|| {
        HorologeError::validation(format!("utc offset {hours}h is outside a single day"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/clock/source.rs"]
mod tests;
