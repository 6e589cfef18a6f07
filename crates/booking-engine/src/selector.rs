//! Two-click date range selection.
//!
//! The first click sets an anchor, the second click on a later day closes the
//! range. Clicking the anchor again clears it; clicking an earlier day moves
//! the anchor there instead of building a backwards range. Any click after a
//! completed range starts over with a new anchor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::model::DateRange;

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Empty,
    SingleAnchor { date: NaiveDate },
    /// Closed range, `start <= end`.
    Range { start: NaiveDate, end: NaiveDate },
}

impl SelectionState {
    /// Apply one day click and return the next state.
    pub fn after_select(self, date: NaiveDate) -> Self {
        match self {
            SelectionState::Empty | SelectionState::Range { .. } => {
                SelectionState::SingleAnchor { date }
            }
            SelectionState::SingleAnchor { date: anchor } if date == anchor => SelectionState::Empty,
            SelectionState::SingleAnchor { date: anchor } if date > anchor => SelectionState::Range {
                start: anchor,
                end: date,
            },
            SelectionState::SingleAnchor { .. } => SelectionState::SingleAnchor { date },
        }
    }

    pub fn to_range(self) -> DateRange {
        match self {
            SelectionState::Empty => DateRange::empty(),
            SelectionState::SingleAnchor { date } => DateRange::anchor(date),
            SelectionState::Range { start, end } => DateRange::new(Some(start), Some(end)),
        }
    }
}

/// The calendar widget's selection, mutated only through [`select`](Self::select)
/// and [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSelector {
    state: SelectionState,
}

impl RangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a completed range, e.g. a suggested default stay.
    pub fn with_range(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BookingError::InvalidRange { start, end });
        }
        Ok(Self {
            state: SelectionState::Range { start, end },
        })
    }

    /// Handle a click on `date`.
    pub fn select(&mut self, date: NaiveDate) -> SelectionState {
        let previous = self.state;
        self.state = previous.after_select(date);
        debug!(%date, from = ?previous, to = ?self.state, "selection changed");
        self.state
    }

    /// Drop any anchor or range.
    pub fn reset(&mut self) {
        self.state = SelectionState::Empty;
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn current_selection(&self) -> DateRange {
        self.state.to_range()
    }

    /// Snapshot of every selected day, in order.
    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.current_selection().days()
    }
}
