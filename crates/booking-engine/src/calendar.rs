//! A booking calendar session: the state behind one calendar view.
//!
//! `BookingCalendar` owns a booking snapshot handed in by the data layer, the
//! user's range selection, the month on display and the booking the user has
//! opened. Every derived value (validity, overview, fetch window) is computed
//! on demand from that state; nothing is cached and nothing is pushed to
//! observers. Callers re-query after each change.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{BookingError, Result};
use crate::grid::MonthOverview;
use crate::model::{Booking, DateRange, Month};
use crate::months::{affected_months, fetch_window, FetchWindow};
use crate::overlap::{check_range, RangeCheck};
use crate::overview::month_overview;
use crate::selector::{RangeSelector, SelectionState};

#[derive(Debug, Clone)]
pub struct BookingCalendar {
    config: EngineConfig,
    bookings: Vec<Booking>,
    selector: RangeSelector,
    shown_month: Month,
    selected_booking: Option<String>,
}

impl BookingCalendar {
    /// An empty session showing `shown_month`.
    pub fn new(config: EngineConfig, shown_month: Month) -> Result<Self> {
        shown_month.validate()?;
        Ok(Self {
            config,
            bookings: Vec::new(),
            selector: RangeSelector::new(),
            shown_month,
            selected_booking: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- Booking snapshot -------------------------------------------------

    /// Swap in a fresh booking snapshot from the data layer.
    ///
    /// The snapshot should cover at least [`fetch_window`](Self::fetch_window)
    /// for the current selection, otherwise validity checks may miss
    /// conflicts. On error the previous snapshot is kept.
    pub fn replace_bookings(&mut self, bookings: Vec<Booking>) -> Result<()> {
        for booking in &bookings {
            booking.validate()?;
        }
        debug!(count = bookings.len(), "replaced booking snapshot");
        self.bookings = bookings;
        self.selected_booking = self
            .selected_booking
            .take()
            .filter(|id| self.bookings.iter().any(|b| &b.id == id));
        Ok(())
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Whether an existing booking covers `date` (buffer not included).
    pub fn is_day_booked(&self, date: NaiveDate) -> bool {
        self.bookings.iter().any(|booking| booking.contains(date))
    }

    /// Open a booking by id.
    pub fn select_booking(&mut self, id: &str) -> Result<&Booking> {
        let booking = self
            .bookings
            .iter()
            .find(|booking| booking.id == id)
            .ok_or_else(|| BookingError::UnknownBooking(id.to_string()))?;
        self.selected_booking = Some(booking.id.clone());
        Ok(booking)
    }

    pub fn selected_booking(&self) -> Option<&Booking> {
        let id = self.selected_booking.as_ref()?;
        self.bookings.iter().find(|booking| &booking.id == id)
    }

    // -- Selection --------------------------------------------------------

    pub fn select_day(&mut self, date: NaiveDate) -> SelectionState {
        self.selector.select(date)
    }

    pub fn reset_selection(&mut self) {
        self.selector.reset();
    }

    pub fn selection(&self) -> DateRange {
        self.selector.current_selection()
    }

    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.selector.selected_dates()
    }

    /// Whether the current selection may be submitted as a new booking.
    pub fn selection_valid(&self) -> bool {
        self.check_selection().is_free()
    }

    pub fn check_selection(&self) -> RangeCheck<'_> {
        check_range(&self.selection(), &self.bookings, self.config.buffer_days)
    }

    pub fn affected_months(&self) -> Vec<Month> {
        affected_months(&self.selection())
    }

    /// Bookings the data layer should load for the current selection.
    pub fn fetch_window(&self) -> Result<Option<FetchWindow>> {
        fetch_window(
            &self.selection(),
            self.config.buffer_days,
            self.config.lookahead_months,
        )
    }

    // -- Displayed month --------------------------------------------------

    pub fn shown_month(&self) -> Month {
        self.shown_month
    }

    pub fn show_month(&mut self, month: Month) -> Result<()> {
        month.validate()?;
        self.shown_month = month;
        Ok(())
    }

    pub fn next_month(&mut self) -> Month {
        self.shown_month = self.shown_month.next();
        self.shown_month
    }

    pub fn previous_month(&mut self) -> Month {
        self.shown_month = self.shown_month.previous();
        self.shown_month
    }

    /// The overview of the shown month as of `today`.
    pub fn overview(&self, today: NaiveDate) -> Result<MonthOverview> {
        month_overview(self.shown_month, &self.bookings, &self.selection(), today)
    }
}
