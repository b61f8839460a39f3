use super::*;
use chrono::TimeZone as _;

fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, h, m, s).unwrap()
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn three_oclock_twelve_hour() {
    let c = ClockTimeProvider::angles(at(3, 0, 0), utc(), HourMode::Twelve);
    assert!(close(c.hour_angle, 90.0));
    assert!(close(c.minute_angle, 0.0));
    assert!(close(c.second_angle, 0.0));
}

#[test]
fn midnight_twenty_four_hour_points_down() {
    let c = ClockTimeProvider::angles(at(0, 0, 0), utc(), HourMode::TwentyFour);
    assert!(close(c.hour_angle, 180.0));
    let noon = ClockTimeProvider::angles(at(12, 0, 0), utc(), HourMode::TwentyFour);
    assert!(close(noon.hour_angle, 0.0));
    let six_pm = ClockTimeProvider::angles(at(18, 0, 0), utc(), HourMode::TwentyFour);
    assert!(close(six_pm.hour_angle, 90.0));
}

#[test]
fn fractional_hands_sweep() {
    let ts = at(9, 30, 15) + chrono::Duration::milliseconds(500);
    let c = ClockTimeProvider::angles(ts, utc(), HourMode::Twelve);
    assert!(close(c.second_angle, 15.5 / 60.0 * 360.0));
    let sec_frac = 15.5 / 60.0;
    assert!(close(c.minute_angle, (30.0 + sec_frac) / 60.0 * 360.0));
    assert!(close(
        c.hour_angle,
        (9.0 * 60.0 + 30.0 + sec_frac) / 720.0 * 360.0
    ));
}

#[test]
fn afternoon_wraps_in_twelve_hour_mode() {
    let morning = ClockTimeProvider::angles(at(3, 0, 0), utc(), HourMode::Twelve);
    let afternoon = ClockTimeProvider::angles(at(15, 0, 0), utc(), HourMode::Twelve);
    assert!(close(morning.hour_angle, afternoon.hour_angle));
}

#[test]
fn zone_shift_matches_local_reading() {
    // 03:00 UTC is 08:30 in UTC+5:30.
    let c = ClockTimeProvider::angles_in_zone(at(3, 0, 0), 5.5, HourMode::Twelve);
    assert!(close(c.hour_angle, (8.0 * 60.0 + 30.0) / 720.0 * 360.0));
    assert!(close(c.minute_angle, 180.0));
}

#[test]
fn zone_offset_is_clamped() {
    let a = ClockTimeProvider::angles_in_zone(at(0, 0, 0), 20.0, HourMode::Twelve);
    let b = ClockTimeProvider::angles_in_zone(at(0, 0, 0), 14.0, HourMode::Twelve);
    assert_eq!(a, b);
    let c = ClockTimeProvider::angles_in_zone(at(0, 0, 0), f64::NAN, HourMode::Twelve);
    assert!(close(c.hour_angle, 0.0));
}

#[test]
fn hand_angle_selects_hand() {
    let c = ClockTimeProvider::angles(at(3, 15, 30), utc(), HourMode::Twelve);
    assert_eq!(c.hand_angle(HandType::Hour), Some(c.hour_angle));
    assert_eq!(c.hand_angle(HandType::Minute), Some(c.minute_angle));
    assert_eq!(c.hand_angle(HandType::Second), Some(c.second_angle));
    assert_eq!(c.hand_angle(HandType::None), None);
}
