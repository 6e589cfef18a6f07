//! Months touched by a selection, and the booking window to fetch for them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{add_days, Booking, DateRange, Month};

/// Every calendar month from the month containing `range.start` through the
/// month containing `range.end`, in chronological order.
///
/// Returns an empty list when either endpoint is absent. An inverted range
/// yields the start month when both ends share it, and nothing otherwise.
pub fn affected_months(range: &DateRange) -> Vec<Month> {
    let Some((start, end)) = range.bounds() else {
        return Vec::new();
    };

    let mut months = Vec::new();
    let mut month = Month::containing(start);
    while let Ok(first_day) = month.first_day() {
        if first_day > end {
            break;
        }
        months.push(month);
        month = month.next();
    }
    months
}

/// Date window of bookings to load for a selection.
///
/// A booking is relevant when any of its days lies in `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl FetchWindow {
    pub fn covers(&self, booking: &Booking) -> bool {
        booking.start <= self.to && self.from <= booking.end
    }
}

/// The booking window for `range`.
///
/// Starts `buffer_days` before the first day of the first affected month, so
/// a booking whose cleaning days reach into the selection is included. Ends
/// on the last day of the last affected month extended by `lookahead_months`
/// whole months, and never before the selection's own cleaning days end.
///
/// Every booking that [`check_range`](crate::overlap::check_range) could
/// report for `range` with the same `buffer_days` is covered.
///
/// `Ok(None)` when the range is incomplete.
pub fn fetch_window(
    range: &DateRange,
    buffer_days: u32,
    lookahead_months: u32,
) -> Result<Option<FetchWindow>> {
    let Some((start, end)) = range.bounds() else {
        return Ok(None);
    };
    let (start, end) = (start.min(end), start.max(end));

    let first_day = Month::containing(start).first_day()?;
    let from = first_day
        .checked_sub_days(Days::new(u64::from(buffer_days)))
        .unwrap_or(NaiveDate::MIN);

    let lookahead = i32::try_from(lookahead_months).unwrap_or(i32::MAX);
    let last_day = Month::containing(end).offset(lookahead).last_day()?;
    let to = last_day.max(add_days(end, buffer_days));

    Ok(Some(FetchWindow { from, to }))
}
