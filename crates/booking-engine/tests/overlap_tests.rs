//! Tests for the buffered overlap check.
//!
//! Reference scenario: an existing booking from 2024-06-01 to 2024-06-05.
//! With one cleaning day its blocked window is 06-01..=06-06.

use booking_engine::overlap::intervals_conflict;
use booking_engine::{check_range, is_range_free, Booking, DateRange, RangeCheck};
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn booking(id: &str, start: &str, end: &str) -> Booking {
    Booking::new(id, date(start), date(end), "owner-1").unwrap()
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(Some(date(start)), Some(date(end)))
}

fn june_booking() -> Vec<Booking> {
    vec![booking("b1", "2024-06-01", "2024-06-05")]
}

// ── Reference examples ──────────────────────────────────────────────────────

#[test]
fn start_on_buffer_day_conflicts() {
    assert!(
        !is_range_free(&range("2024-06-06", "2024-06-10"), &june_booking(), 1),
        "06-06 is the cleaning day after the booking"
    );
}

#[test]
fn start_after_buffer_is_free() {
    assert!(is_range_free(
        &range("2024-06-07", "2024-06-10"),
        &june_booking(),
        1
    ));
}

#[test]
fn identical_range_conflicts_for_any_buffer() {
    let bookings = june_booking();
    for buffer in 0..=5 {
        assert!(
            !is_range_free(&range("2024-06-01", "2024-06-05"), &bookings, buffer),
            "identical range must conflict with buffer {buffer}"
        );
    }
}

// ── Table-driven verdicts ───────────────────────────────────────────────────

/// (candidate start, candidate end, buffer, expected conflict)
const CASES: &[(&str, &str, u32, bool)] = &[
    // Buffer of one day.
    ("2024-06-06", "2024-06-10", 1, true),
    ("2024-06-07", "2024-06-10", 1, false),
    ("2024-06-02", "2024-06-03", 1, true),  // inside the booking
    ("2024-05-28", "2024-06-10", 1, true),  // encloses the booking
    ("2024-05-25", "2024-05-31", 1, true),  // own cleaning day lands on 06-01
    ("2024-05-25", "2024-05-30", 1, false), // cleaning day 05-31 is free
    ("2024-06-05", "2024-06-05", 1, true),  // single day on the last booked day
    // No buffer: touching days are free, shared days are not.
    ("2024-06-06", "2024-06-10", 0, false),
    ("2024-06-05", "2024-06-10", 0, true),
    ("2024-05-25", "2024-05-31", 0, false),
    ("2024-05-25", "2024-06-01", 0, true),
    // Two cleaning days push the first free start to 06-08.
    ("2024-06-07", "2024-06-10", 2, true),
    ("2024-06-08", "2024-06-10", 2, false),
    ("2024-05-25", "2024-05-29", 2, false),
    ("2024-05-25", "2024-05-30", 2, true),
];

#[test]
fn table_of_verdicts() {
    let bookings = june_booking();
    for &(start, end, buffer, conflict) in CASES {
        assert_eq!(
            !is_range_free(&range(start, end), &bookings, buffer),
            conflict,
            "candidate {start}..{end} with buffer {buffer}"
        );
    }
}

#[test]
fn swapping_existing_and_candidate_keeps_verdict() {
    let (b_start, b_end) = (date("2024-06-01"), date("2024-06-05"));
    for &(start, end, buffer, conflict) in CASES {
        let (c_start, c_end) = (date(start), date(end));
        let forward = intervals_conflict(c_start, c_end, b_start, b_end, buffer);
        let swapped = intervals_conflict(b_start, b_end, c_start, c_end, buffer);
        assert_eq!(forward, conflict, "forward {start}..{end} buffer {buffer}");
        assert_eq!(swapped, conflict, "swapped {start}..{end} buffer {buffer}");
    }
}

// ── Malformed candidates ────────────────────────────────────────────────────

#[test]
fn incomplete_candidate_is_never_free() {
    let bookings: Vec<Booking> = vec![];
    assert!(!is_range_free(&DateRange::empty(), &bookings, 1));
    assert!(!is_range_free(&DateRange::anchor(date("2024-06-20")), &bookings, 1));
    assert!(!is_range_free(
        &DateRange::new(None, Some(date("2024-06-20"))),
        &bookings,
        1
    ));
    assert_eq!(
        check_range(&DateRange::empty(), &bookings, 1),
        RangeCheck::Incomplete
    );
}

#[test]
fn inverted_candidate_is_not_free() {
    let candidate = range("2024-07-10", "2024-07-01");
    assert!(!is_range_free(&candidate, &[], 1));
    assert_eq!(check_range(&candidate, &[], 1), RangeCheck::Inverted);
}

#[test]
fn no_bookings_means_free() {
    assert!(is_range_free(&range("2024-06-01", "2024-06-30"), &[], 1));
}

// ── Conflict reporting ──────────────────────────────────────────────────────

#[test]
fn check_range_lists_every_conflicting_booking() {
    let bookings = vec![
        booking("early", "2024-06-01", "2024-06-05"),
        booking("far", "2024-08-01", "2024-08-03"),
        booking("late", "2024-06-12", "2024-06-14"),
    ];

    let result = check_range(&range("2024-06-04", "2024-06-12"), &bookings, 1);

    let ids: Vec<&str> = result.conflicts().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late"]);
    assert!(!result.is_free());
}

#[test]
fn free_result_has_no_conflicts() {
    let bookings = june_booking();
    let result = check_range(&range("2024-06-20", "2024-06-22"), &bookings, 1);
    assert_eq!(result, RangeCheck::Free);
    assert!(result.conflicts().is_empty());
}

#[test]
fn range_check_serializes_with_status_tag() {
    let bookings = june_booking();
    let free = serde_json::to_value(check_range(&range("2024-06-20", "2024-06-22"), &bookings, 1))
        .unwrap();
    assert_eq!(free["status"], "free");

    let hit = serde_json::to_value(check_range(&range("2024-06-03", "2024-06-04"), &bookings, 1))
        .unwrap();
    assert_eq!(hit["status"], "conflicts");
    assert_eq!(hit["conflicts"][0]["id"], "b1");
}
