use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::foundation::core::LayerId;

/// A frame counts as late when its delta exceeds this multiple of the frame budget.
pub const LATE_FRAME_FACTOR: f64 = 1.5;

/// Rolling frame-rate statistics over the last `window` ticks.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f64>,
    window: usize,
    budget_secs: f64,
    total_frames: u64,
    late_frames: u64,
}

impl FrameStats {
    /// Stats over `window` samples (at least 1) against a `target_fps` budget.
    pub fn new(window: usize, target_fps: f64) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            budget_secs: 1.0 / target_fps,
            total_frames: 0,
            late_frames: 0,
        }
    }

    /// Record one tick's delta.
    pub fn record(&mut self, delta: Duration) {
        let secs = delta.as_secs_f64();
        self.total_frames += 1;
        if secs > self.budget_secs * LATE_FRAME_FACTOR {
            self.late_frames += 1;
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(secs);
    }

    /// Frames per second over the window; 0 before any time has elapsed.
    pub fn frame_rate(&self) -> f64 {
        let elapsed: f64 = self.samples.iter().sum();
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f64 / elapsed
    }

    /// Ticks recorded since creation or the last reset.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Ticks that overran the frame budget.
    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Drop all samples and counters.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.total_frames = 0;
        self.late_frames = 0;
    }
}

/// One recorded error.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorEntry {
    /// When it was recorded (time-source clock).
    pub at: DateTime<Utc>,
    /// Layer it concerns; `None` for orchestrator-level errors.
    pub layer: Option<LayerId>,
    /// Human-readable message.
    pub message: String,
}

/// Bounded error log keeping the most recent `capacity` entries.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    entries: VecDeque<ErrorEntry>,
    capacity: usize,
    total: u64,
}

impl ErrorLog {
    /// Empty log holding at most `capacity` entries (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, at: DateTime<Utc>, layer: Option<LayerId>, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ErrorEntry {
            at,
            layer,
            message: message.into(),
        });
        self.total += 1;
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }

    /// Newest entry.
    pub fn latest(&self) -> Option<&ErrorEntry> {
        self.entries.back()
    }

    /// Retained entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nothing retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ever pushed, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total
    }

    /// Drop retained entries. The total is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/stats.rs"]
mod tests;
