use super::*;
use chrono::{Duration, TimeZone as _};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn clockwise_minute_revolution() {
    let cw = Some(Direction::Clockwise);
    assert!(close(
        spin_angle(t0(), t0() + Duration::seconds(15), 60.0, cw, 0.0),
        90.0
    ));
    assert!(close(
        spin_angle(t0(), t0() + Duration::seconds(30), 60.0, cw, 0.0),
        180.0
    ));
    assert!(close(
        spin_angle(t0(), t0() + Duration::seconds(60), 60.0, cw, 0.0),
        0.0
    ));
}

#[test]
fn counterclockwise_wraps_below_zero() {
    let ccw = Some(Direction::Counterclockwise);
    assert!(close(
        spin_angle(t0(), t0() + Duration::seconds(15), 60.0, ccw, 0.0),
        270.0
    ));
}

#[test]
fn initial_angle_offsets_rotation() {
    let cw = Some(Direction::Clockwise);
    assert!(close(spin_angle_for_elapsed(10.0, 40.0, cw, 45.0), 135.0));
}

#[test]
fn off_or_bad_speed_is_static() {
    assert_eq!(spin_angle_for_elapsed(12.0, 60.0, None, 33.0), 33.0);
    let cw = Some(Direction::Clockwise);
    assert_eq!(spin_angle_for_elapsed(12.0, 0.0, cw, 33.0), 33.0);
    assert_eq!(spin_angle_for_elapsed(12.0, -5.0, cw, 33.0), 33.0);
    assert_eq!(spin_angle_for_elapsed(12.0, f64::NAN, cw, 33.0), 33.0);
}

#[test]
fn unwrapped_angle_is_monotonic() {
    let cw = Some(Direction::Clockwise);
    let mut turns = 0.0;
    let mut last_raw = 0.0;
    let mut last_unwrapped = 0.0;
    for ms in (0..120_000).step_by(250) {
        let a = spin_angle(t0(), t0() + Duration::milliseconds(ms), 60.0, cw, 0.0);
        if a < last_raw {
            turns += 360.0;
        }
        let unwrapped = a + turns;
        assert!(unwrapped >= last_unwrapped, "{ms}ms: {unwrapped} < {last_unwrapped}");
        last_raw = a;
        last_unwrapped = unwrapped;
    }
}
