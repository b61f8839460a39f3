use super::*;
use crate::clock::time::{ClockTimeProvider, HourMode};
use crate::config::model::LayerConfig;
use crate::foundation::core::LayerId;
use crate::layer::animator::LayerAnimator;
use chrono::{Offset as _, TimeZone as _, Utc};

fn clock() -> ClockState {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
    ClockTimeProvider::angles(at, Utc.fix(), HourMode::Twelve)
}

fn frame() -> LayerFrame {
    let id = LayerId::new(1).unwrap();
    let cfg = LayerConfig {
        image: "dial.png".to_string(),
        ..LayerConfig::default()
    };
    let c = clock();
    LayerAnimator::new(id, cfg).unwrap().update(Some(&c), c.timestamp)
}

#[test]
fn records_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin_frame(&clock()).unwrap();
    sink.present(&frame()).unwrap();
    sink.end_frame().unwrap();
    sink.begin_frame(&clock()).unwrap();
    sink.end_frame().unwrap();

    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[0].layers.len(), 1);
    assert_eq!(sink.frames[0].clock.hour_angle, 270.0);
    assert!(sink.frames[1].layers.is_empty());
}

#[test]
fn rejects_out_of_order_calls() {
    let mut sink = InMemorySink::new();
    assert!(sink.present(&frame()).is_err());
    assert!(sink.end_frame().is_err());
    sink.begin_frame(&clock()).unwrap();
    assert!(sink.begin_frame(&clock()).is_err());
}
