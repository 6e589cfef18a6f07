//! Tests for bookings, date ranges, months, day parsing and config.

use booking_engine::{parse_day, Booking, BookingError, DateRange, EngineConfig, Month};
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ── Booking ─────────────────────────────────────────────────────────────────

#[test]
fn booking_rejects_start_after_end() {
    let err = Booking::new("b1", date("2024-06-05"), date("2024-06-01"), "u1").unwrap_err();
    assert!(matches!(err, BookingError::InvalidBooking { ref id, .. } if id == "b1"));
}

#[test]
fn single_day_booking_is_valid() {
    let booking = Booking::new("b1", date("2024-06-05"), date("2024-06-05"), "u1").unwrap();
    assert_eq!(booking.days().count(), 1);
    assert!(booking.contains(date("2024-06-05")));
}

#[test]
fn booking_deserializes_with_camel_case_owner() {
    let json = r#"{"id":"b1","start":"2024-06-01","end":"2024-06-03","userId":"u9"}"#;
    let booking: Booking = serde_json::from_str(json).unwrap();
    assert_eq!(booking.owner_id, "u9");
    assert_eq!(booking.end, date("2024-06-03"));
}

// ── DateRange ───────────────────────────────────────────────────────────────

#[test]
fn closed_range_contains_endpoints() {
    let range = DateRange::closed(date("2024-06-01"), date("2024-06-03")).unwrap();
    assert!(range.contains(date("2024-06-01")));
    assert!(range.contains(date("2024-06-03")));
    assert!(!range.contains(date("2024-06-04")));
    assert_eq!(range.days().len(), 3);
}

#[test]
fn closed_rejects_inverted_range() {
    assert!(DateRange::closed(date("2024-06-03"), date("2024-06-01")).is_err());
}

#[test]
fn end_without_start_selects_nothing() {
    let range = DateRange::new(None, Some(date("2024-06-03")));
    assert!(!range.contains(date("2024-06-03")));
    assert!(!range.is_complete());
    assert!(range.days().is_empty());
}

#[test]
fn missing_fields_deserialize_as_absent() {
    let range: DateRange = serde_json::from_str(r#"{"start":"2024-06-01"}"#).unwrap();
    assert_eq!(range, DateRange::anchor(date("2024-06-01")));
}

// ── Month ───────────────────────────────────────────────────────────────────

#[test]
fn month_new_rejects_thirteenth_month() {
    assert!(matches!(
        Month::new(12, 2024).unwrap_err(),
        BookingError::InvalidMonth(12)
    ));
}

#[test]
fn month_bounds_handle_leap_years() {
    let february = Month::new(1, 2024).unwrap();
    assert_eq!(february.first_day().unwrap(), date("2024-02-01"));
    assert_eq!(february.last_day().unwrap(), date("2024-02-29"));
    assert_eq!(
        Month::new(1, 2023).unwrap().last_day().unwrap(),
        date("2023-02-28")
    );
    assert_eq!(
        Month::new(11, 2024).unwrap().last_day().unwrap(),
        date("2024-12-31")
    );
}

#[test]
fn month_navigation_wraps_years() {
    let december = Month::new(11, 2024).unwrap();
    assert_eq!(december.next(), Month::new(0, 2025).unwrap());
    assert_eq!(
        Month::new(0, 2025).unwrap().previous(),
        december
    );
    assert_eq!(december.offset(-24), Month::new(11, 2022).unwrap());
    assert_eq!(december.offset(13), Month::new(0, 2026).unwrap());
}

#[test]
fn months_order_chronologically() {
    let mut months = vec![
        Month::new(0, 2025).unwrap(),
        Month::new(11, 2024).unwrap(),
        Month::new(3, 2024).unwrap(),
    ];
    months.sort();
    assert_eq!(
        months,
        vec![
            Month::new(3, 2024).unwrap(),
            Month::new(11, 2024).unwrap(),
            Month::new(0, 2025).unwrap(),
        ]
    );
}

#[test]
fn month_display_and_parse_are_one_based() {
    let june = Month::new(5, 2024).unwrap();
    assert_eq!(june.to_string(), "2024-06");
    assert_eq!("2024-06".parse::<Month>().unwrap(), june);
    assert!("2024-13".parse::<Month>().is_err());
    assert!("2024-00".parse::<Month>().is_err());
    assert!("June".parse::<Month>().is_err());
}

#[test]
fn month_containing_uses_zero_based_number() {
    assert_eq!(
        Month::containing(date("2024-01-31")),
        Month::new(0, 2024).unwrap()
    );
}

// ── parse_day ───────────────────────────────────────────────────────────────

#[test]
fn parse_day_accepts_plain_dates() {
    assert_eq!(parse_day("2024-06-01").unwrap(), date("2024-06-01"));
    assert_eq!(parse_day(" 2024-06-01 ").unwrap(), date("2024-06-01"));
}

#[test]
fn parse_day_reduces_timestamps_to_utc_day() {
    assert_eq!(
        parse_day("2024-06-01T22:00:00-04:00").unwrap(),
        date("2024-06-02")
    );
    assert_eq!(parse_day("2024-06-01T08:30:00Z").unwrap(), date("2024-06-01"));
}

#[test]
fn parse_day_rejects_garbage() {
    assert!(matches!(
        parse_day("next tuesday").unwrap_err(),
        BookingError::InvalidDate(_)
    ));
}

// ── EngineConfig ────────────────────────────────────────────────────────────

#[test]
fn config_defaults_to_one_cleaning_day() {
    let config = EngineConfig::default();
    assert_eq!(config.buffer_days, 1);
    assert_eq!(config.lookahead_months, 3);
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config = EngineConfig::from_json(r#"{"buffer_days": 2}"#).unwrap();
    assert_eq!(config.buffer_days, 2);
    assert_eq!(config.lookahead_months, 3);
    assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
}

#[test]
fn config_rejects_malformed_json() {
    assert!(matches!(
        EngineConfig::from_json("{buffer_days").unwrap_err(),
        BookingError::Config(_)
    ));
}

#[test]
fn month_offset_saturates_at_year_limits() {
    let last = Month {
        year: i32::MAX,
        number: 11,
    };
    assert_eq!(last.next(), last);
    assert_eq!(last.offset(i32::MAX), last);

    let first = Month {
        year: i32::MIN,
        number: 0,
    };
    assert_eq!(first.previous(), first);
    assert_eq!(first.offset(i32::MIN), first);

    assert_eq!(
        last.previous(),
        Month {
            year: i32::MAX,
            number: 10,
        }
    );
}
