//! Check a candidate date range against existing bookings.
//!
//! Every booking is followed by `buffer_days` of cleaning time. Both the
//! booking and the candidate are widened on their end side only:
//! `[start, end + buffer]`. A candidate conflicts with a booking when any of
//! these hold (inclusive, at day granularity):
//!
//! 1. the candidate's start lies in the booking's widened interval
//! 2. the candidate's widened end lies in the booking's widened interval
//! 3. the booking's start lies in the candidate's widened interval
//! 4. the booking's widened end lies in the candidate's widened interval
//!
//! Because the bounds are inclusive, a candidate starting on the very day a
//! booking's buffer ends is still a conflict.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::model::{add_days, Booking, DateRange};

/// Outcome of checking a candidate range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "conflicts", rename_all = "snake_case")]
pub enum RangeCheck<'a> {
    /// At least one endpoint is missing.
    Incomplete,
    /// `start` lies after `end`.
    Inverted,
    /// The range collides with these bookings, in snapshot order.
    Conflicts(Vec<&'a Booking>),
    /// No booking collides with the range.
    Free,
}

impl RangeCheck<'_> {
    pub fn is_free(&self) -> bool {
        matches!(self, RangeCheck::Free)
    }

    /// The serialized tag: `incomplete`, `inverted`, `conflicts` or `free`.
    pub fn status(&self) -> &'static str {
        match self {
            RangeCheck::Incomplete => "incomplete",
            RangeCheck::Inverted => "inverted",
            RangeCheck::Conflicts(_) => "conflicts",
            RangeCheck::Free => "free",
        }
    }

    /// The colliding bookings; empty unless this is `Conflicts`.
    pub fn conflicts(&self) -> &[&Booking] {
        match self {
            RangeCheck::Conflicts(bookings) => bookings,
            _ => &[],
        }
    }
}

/// Whether `candidate` can be booked without touching any booking or its buffer.
///
/// Incomplete or inverted candidates are never free.
pub fn is_range_free(candidate: &DateRange, bookings: &[Booking], buffer_days: u32) -> bool {
    check_range(candidate, bookings, buffer_days).is_free()
}

/// Check `candidate` and report which bookings it collides with.
pub fn check_range<'a>(
    candidate: &DateRange,
    bookings: &'a [Booking],
    buffer_days: u32,
) -> RangeCheck<'a> {
    let Some((start, end)) = candidate.bounds() else {
        return RangeCheck::Incomplete;
    };
    if start > end {
        debug!(%start, %end, "candidate range is inverted");
        return RangeCheck::Inverted;
    }

    let conflicts: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| {
            let hit = intervals_conflict(start, end, booking.start, booking.end, buffer_days);
            if hit {
                trace!(booking = %booking.id, %start, %end, "candidate collides with booking");
            }
            hit
        })
        .collect();

    debug!(
        %start,
        %end,
        buffer_days,
        bookings = bookings.len(),
        conflicts = conflicts.len(),
        "checked candidate range"
    );

    if conflicts.is_empty() {
        RangeCheck::Free
    } else {
        RangeCheck::Conflicts(conflicts)
    }
}

/// The four-condition buffered overlap test between a candidate
/// `[start, end]` and an existing booking `[other_start, other_end]`.
///
/// Swapping the two intervals gives the same answer: conditions 1 and 3,
/// and 2 and 4, trade places.
pub fn intervals_conflict(
    start: NaiveDate,
    end: NaiveDate,
    other_start: NaiveDate,
    other_end: NaiveDate,
    buffer_days: u32,
) -> bool {
    let end_buffered = add_days(end, buffer_days);
    let other_end_buffered = add_days(other_end, buffer_days);

    within(start, other_start, other_end_buffered)
        || within(end_buffered, other_start, other_end_buffered)
        || within(other_start, start, end_buffered)
        || within(other_end_buffered, start, end_buffered)
}

fn within(day: NaiveDate, lo: NaiveDate, hi: NaiveDate) -> bool {
    lo <= day && day <= hi
}
