//! Error types for booking-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid month number: {0} (expected 0-11)")]
    InvalidMonth(u32),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid booking '{id}': start {start} is after end {end}")]
    InvalidBooking {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown booking: {0}")]
    UnknownBooking(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
