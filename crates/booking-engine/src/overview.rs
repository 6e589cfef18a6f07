//! Month overview derived from a booking snapshot.
//!
//! Booked days are shown without the cleaning buffer; the buffer only matters
//! when validating a new range (see [`crate::overlap`]).

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::grid::{build_grid, MonthOverview};
use crate::model::{Booking, DateRange, Month};

/// Every day covered by any booking's `start..=end`.
pub fn unavailable_dates(bookings: &[Booking]) -> BTreeSet<NaiveDate> {
    bookings.iter().flat_map(Booking::days).collect()
}

/// Build the calendar overview of `month` for the given bookings and selection.
///
/// An empty or partial selection is not an error: nothing (or just the
/// anchor) is marked selected.
///
/// # Errors
/// Returns `BookingError::InvalidMonth` if `month.number` is outside 0-11.
pub fn month_overview(
    month: Month,
    bookings: &[Booking],
    selection: &DateRange,
    today: NaiveDate,
) -> Result<MonthOverview> {
    build_grid(month, selection, &unavailable_dates(bookings), today)
}
