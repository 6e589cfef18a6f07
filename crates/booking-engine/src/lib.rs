//! # booking-engine
//!
//! Availability and calendar computations for date-range bookings (rentals,
//! venues, anything booked by the whole day).
//!
//! The engine is pure: it is handed a snapshot of existing bookings and the
//! user's selection, and returns validation verdicts and calendar overviews.
//! It never fetches data and never reads the wall clock. "Today" is always an
//! explicit argument.
//!
//! ## Modules
//!
//! - [`model`] — `Booking`, `DateRange`, `Month` and day parsing
//! - [`selector`] — two-click date range selection state machine
//! - [`overlap`] — buffered overlap check between a candidate range and bookings
//! - [`months`] — months affected by a selection and the booking fetch window
//! - [`grid`] — full-week calendar grid for a month
//! - [`overview`] — month overview derived from bookings
//! - [`calendar`] — `BookingCalendar`, a session tying the pieces together
//! - [`config`] — buffer and lookahead settings
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod months;
pub mod overlap;
pub mod overview;
pub mod selector;

pub use calendar::BookingCalendar;
pub use config::{EngineConfig, DEFAULT_BUFFER_DAYS, DEFAULT_LOOKAHEAD_MONTHS};
pub use error::BookingError;
pub use grid::{build_grid, DayOverview, MonthOverview, WeekOverview};
pub use model::{parse_day, Booking, DateRange, Month};
pub use months::{affected_months, fetch_window, FetchWindow};
pub use overlap::{check_range, is_range_free, RangeCheck};
pub use overview::{month_overview, unavailable_dates};
pub use selector::{RangeSelector, SelectionState};
