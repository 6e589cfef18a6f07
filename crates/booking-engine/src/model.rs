//! Core data types: bookings, date ranges and calendar months.
//!
//! All dates are calendar days (`NaiveDate`). Records coming from the data
//! layer are expected to be normalized to day granularity already; use
//! [`parse_day`] to reduce timestamps to their UTC calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// An existing booking of the rented object, covering `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Opaque identifier assigned by the data layer.
    pub id: String,
    /// First booked day (inclusive).
    pub start: NaiveDate,
    /// Last booked day (inclusive).
    pub end: NaiveDate,
    /// The user who owns this booking.
    #[serde(alias = "ownerId", alias = "userId")]
    pub owner_id: String,
}

impl Booking {
    /// Create a booking, rejecting a start that lies after the end.
    pub fn new(
        id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        owner_id: impl Into<String>,
    ) -> Result<Self> {
        let booking = Self {
            id: id.into(),
            start,
            end,
            owner_id: owner_id.into(),
        };
        booking.validate()?;
        Ok(booking)
    }

    /// Check the `start <= end` invariant.
    ///
    /// Deserialized bookings bypass [`Booking::new`], so anything accepting a
    /// snapshot from outside should call this.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(BookingError::InvalidBooking {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whether `date` is one of the booked days.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every booked day, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_inclusive(self.start, self.end)
    }
}

/// A possibly incomplete date selection.
///
/// - both endpoints absent: nothing selected
/// - only `start`: a single anchor waiting for the second click
/// - both present: a closed range, normally with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from raw endpoints without checking their order.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// No selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single anchor day with no end yet.
    pub fn anchor(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: None,
        }
    }

    /// A closed range. Fails when `start > end`.
    pub fn closed(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BookingError::InvalidRange { start, end });
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    /// True when neither endpoint is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when both endpoints are set.
    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    /// Both endpoints, if present.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?, self.end?))
    }

    /// Whether `date` is selected.
    ///
    /// A closed range contains its endpoints. A lone anchor contains only
    /// itself, so the first click is visible in the calendar.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            (Some(anchor), None) => anchor == date,
            _ => false,
        }
    }

    /// Materialize the selected days.
    pub fn days(&self) -> Vec<NaiveDate> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => days_inclusive(start, end).collect(),
            (Some(anchor), None) => vec![anchor],
            _ => Vec::new(),
        }
    }
}

/// A calendar month. `number` is zero-based (0 = January).
///
/// Ordering compares `(year, number)`, so sorting months is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub number: u32,
}

impl Month {
    /// Create a month, rejecting numbers outside 0-11.
    pub fn new(number: u32, year: i32) -> Result<Self> {
        let month = Self { year, number };
        month.validate()?;
        Ok(month)
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            number: date.month0(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.number > 11 {
            return Err(BookingError::InvalidMonth(self.number));
        }
        Ok(())
    }

    /// The 1st of the month.
    pub fn first_day(&self) -> Result<NaiveDate> {
        self.validate()?;
        NaiveDate::from_ymd_opt(self.year, self.number + 1, 1)
            .ok_or_else(|| BookingError::InvalidDate(format!("{self}-01")))
    }

    /// The last day of the month (28th to 31st).
    pub fn last_day(&self) -> Result<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| BookingError::InvalidDate(format!("end of {self}")))
    }

    /// Shift by a signed number of months, carrying into the year.
    ///
    /// Saturates at the first and last month of the `i32` year range.
    pub fn offset(self, months: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.number) + i64::from(months);
        match i32::try_from(total.div_euclid(12)) {
            Ok(year) => Self {
                year,
                number: total.rem_euclid(12) as u32,
            },
            Err(_) if total < 0 => Self { year: i32::MIN, number: 0 },
            Err(_) => Self { year: i32::MAX, number: 11 },
        }
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }
}

/// Formats as `YYYY-MM` with a one-based month, e.g. `2024-06` for June.
impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.number + 1)
    }
}

/// Parses the `YYYY-MM` form produced by `Display`.
impl FromStr for Month {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BookingError::InvalidDate(format!("'{s}' (expected YYYY-MM)"));
        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Month::new(month - 1, year)
    }
}

/// Parse a calendar day.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which is reduced to its UTC
/// calendar day (e.g., "2024-06-01T22:00:00-04:00" → 2024-06-02).
pub fn parse_day(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| BookingError::InvalidDate(format!("'{s}': {e}")))
}

/// `date + days`, saturating at the last representable date.
pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Every day from `start` through `end`; empty when `start > end`.
pub(crate) fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
