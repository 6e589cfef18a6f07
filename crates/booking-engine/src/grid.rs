//! Full-week calendar grid for a single month.
//!
//! The grid starts on the Monday on or before the 1st and ends on the Sunday
//! on or after the last day of the month, so it always holds whole weeks.
//! Days borrowed from the neighbouring months are flagged
//! `in_shown_month = false`.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::model::{add_days, DateRange, Month};

/// Display flags for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverview {
    pub date: NaiveDate,
    /// The day is taken by an existing booking.
    pub booked: bool,
    /// The day is part of the current selection.
    pub selected: bool,
    pub is_today: bool,
    /// False for overflow days from the previous or next month.
    pub in_shown_month: bool,
}

/// One Monday-to-Sunday row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOverview {
    pub days: [DayOverview; 7],
}

impl WeekOverview {
    pub fn day(&self, weekday: Weekday) -> &DayOverview {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn monday(&self) -> &DayOverview {
        self.day(Weekday::Mon)
    }

    pub fn sunday(&self) -> &DayOverview {
        self.day(Weekday::Sun)
    }
}

/// Every ISO week intersecting `month`, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverview {
    pub month: Month,
    pub weeks: Vec<WeekOverview>,
}

impl MonthOverview {
    /// All days of the grid, row by row.
    pub fn days(&self) -> impl Iterator<Item = &DayOverview> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// Look up a day on the grid.
    pub fn day(&self, date: NaiveDate) -> Option<&DayOverview> {
        self.days().find(|day| day.date == date)
    }
}

/// Build the calendar grid for `month`.
///
/// `booked` is membership in `unavailable`, `selected` is membership in
/// `selection` (see [`DateRange::contains`]), `is_today` compares against the
/// supplied `today`.
///
/// # Errors
/// Returns `BookingError::InvalidMonth` if `month.number` is outside 0-11.
pub fn build_grid(
    month: Month,
    selection: &DateRange,
    unavailable: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> Result<MonthOverview> {
    let first_day = month.first_day()?;
    let last_day = month.last_day()?;

    let grid_start = first_day
        .checked_sub_days(Days::new(u64::from(
            first_day.weekday().num_days_from_monday(),
        )))
        .ok_or_else(|| BookingError::InvalidDate(format!("week before {first_day}")))?;
    let grid_end = last_day
        .checked_add_days(Days::new(u64::from(
            6 - last_day.weekday().num_days_from_monday(),
        )))
        .ok_or_else(|| BookingError::InvalidDate(format!("week after {last_day}")))?;

    let week_count = ((grid_end - grid_start).num_days() + 1) / 7;
    let weeks: Vec<WeekOverview> = (0..week_count)
        .map(|week| {
            let monday = add_days(grid_start, (week * 7) as u32);
            WeekOverview {
                days: std::array::from_fn(|offset| {
                    let date = add_days(monday, offset as u32);
                    DayOverview {
                        date,
                        booked: unavailable.contains(&date),
                        selected: selection.contains(date),
                        is_today: date == today,
                        in_shown_month: Month::containing(date) == month,
                    }
                }),
            }
        })
        .collect();

    debug!(%month, %grid_start, %grid_end, weeks = weeks.len(), "built calendar grid");

    Ok(MonthOverview { month, weeks })
}
