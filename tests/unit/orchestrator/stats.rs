use super::*;
use chrono::TimeZone as _;

#[test]
fn frame_rate_over_rolling_window() {
    let mut stats = FrameStats::new(4, 60.0);
    assert_eq!(stats.frame_rate(), 0.0);

    for _ in 0..4 {
        stats.record(Duration::from_millis(50));
    }
    assert!((stats.frame_rate() - 20.0).abs() < 1e-9);

    // Old samples roll out of the window.
    for _ in 0..4 {
        stats.record(Duration::from_millis(10));
    }
    assert!((stats.frame_rate() - 100.0).abs() < 1e-9);
    assert_eq!(stats.total_frames(), 8);
}

#[test]
fn late_frames_exceed_one_and_a_half_budgets() {
    let mut stats = FrameStats::new(10, 100.0);
    stats.record(Duration::from_millis(10));
    stats.record(Duration::from_millis(12));
    stats.record(Duration::from_millis(16));
    stats.record(Duration::from_millis(40));
    assert_eq!(stats.late_frames(), 2);

    stats.reset();
    assert_eq!(stats.total_frames(), 0);
    assert_eq!(stats.late_frames(), 0);
    assert_eq!(stats.frame_rate(), 0.0);
}

#[test]
fn zero_deltas_do_not_divide_by_zero() {
    let mut stats = FrameStats::new(3, 60.0);
    stats.record(Duration::ZERO);
    assert_eq!(stats.frame_rate(), 0.0);
    assert_eq!(stats.total_frames(), 1);
}

#[test]
fn error_log_keeps_most_recent() {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let layer = LayerId::new(2).unwrap();
    let mut log = ErrorLog::new(3);
    assert!(log.is_empty());
    for i in 0..5 {
        log.push(at, Some(layer), format!("e{i}"));
    }
    log.push(at, None, "orchestrator");

    assert_eq!(log.len(), 3);
    assert_eq!(log.total_recorded(), 6);
    let msgs: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
    assert_eq!(msgs, vec!["e3", "e4", "orchestrator"]);
    assert_eq!(log.latest().map(|e| e.layer), Some(None));

    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.total_recorded(), 6);
}

#[test]
fn zero_capacity_still_keeps_one() {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut log = ErrorLog::new(0);
    log.push(at, None, "a");
    log.push(at, None, "b");
    assert_eq!(log.len(), 1);
    assert_eq!(log.latest().map(|e| e.message.as_str()), Some("b"));
}
