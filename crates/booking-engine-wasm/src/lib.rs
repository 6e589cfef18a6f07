//! WASM bindings for booking-engine.
//!
//! Exposes range validation, affected months, month overviews and the range
//! selector to the browser calendar via `wasm-bindgen`. Complex values cross
//! the boundary as JSON strings and dates as `YYYY-MM-DD` (RFC 3339 timestamps
//! are accepted and reduced to their UTC day).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{Booking, DateRange, Month};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Booking record as stored by the web app.
#[derive(Deserialize)]
struct BookingInput {
    id: String,
    start: String,
    end: String,
    #[serde(alias = "ownerId", alias = "userId")]
    owner_id: String,
}

#[derive(Serialize)]
struct RangeCheckDto<'a> {
    free: bool,
    status: &'static str,
    conflicts: Vec<&'a Booking>,
}

// ---------------------------------------------------------------------------
// JSON-level implementations (plain Rust errors, testable off-wasm)
// ---------------------------------------------------------------------------

fn parse_optional_day(day: Option<&str>) -> Result<Option<chrono::NaiveDate>, String> {
    day.map(booking_engine::parse_day)
        .transpose()
        .map_err(|e| e.to_string())
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, String> {
    Ok(DateRange::new(
        parse_optional_day(start)?,
        parse_optional_day(end)?,
    ))
}

/// Convert a JSON array of booking records into validated `Booking`s.
fn parse_bookings_json(json: &str) -> Result<Vec<Booking>, String> {
    let inputs: Vec<BookingInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid bookings JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = booking_engine::parse_day(&input.start).map_err(|e| e.to_string())?;
            let end = booking_engine::parse_day(&input.end).map_err(|e| e.to_string())?;
            Booking::new(input.id, start, end, input.owner_id).map_err(|e| e.to_string())
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn check_range_json(
    start: Option<&str>,
    end: Option<&str>,
    bookings_json: &str,
    buffer_days: u32,
) -> Result<String, String> {
    let candidate = parse_range(start, end)?;
    let bookings = parse_bookings_json(bookings_json)?;
    let check = booking_engine::check_range(&candidate, &bookings, buffer_days);
    to_json(&RangeCheckDto {
        free: check.is_free(),
        status: check.status(),
        conflicts: check.conflicts().to_vec(),
    })
}

fn is_range_free_inner(
    start: Option<&str>,
    end: Option<&str>,
    bookings_json: &str,
    buffer_days: u32,
) -> Result<bool, String> {
    let candidate = parse_range(start, end)?;
    let bookings = parse_bookings_json(bookings_json)?;
    Ok(booking_engine::is_range_free(
        &candidate,
        &bookings,
        buffer_days,
    ))
}

fn affected_months_json(start: Option<&str>, end: Option<&str>) -> Result<String, String> {
    let range = parse_range(start, end)?;
    to_json(&booking_engine::affected_months(&range))
}

fn fetch_window_json(
    start: Option<&str>,
    end: Option<&str>,
    buffer_days: u32,
    lookahead_months: u32,
) -> Result<String, String> {
    let range = parse_range(start, end)?;
    let window = booking_engine::fetch_window(&range, buffer_days, lookahead_months)
        .map_err(|e| e.to_string())?;
    to_json(&window)
}

fn month_overview_json(
    month_number: u32,
    year: i32,
    bookings_json: &str,
    start: Option<&str>,
    end: Option<&str>,
    today: &str,
) -> Result<String, String> {
    let month = Month::new(month_number, year).map_err(|e| e.to_string())?;
    let bookings = parse_bookings_json(bookings_json)?;
    let selection = parse_range(start, end)?;
    let today = booking_engine::parse_day(today).map_err(|e| e.to_string())?;
    let overview = booking_engine::month_overview(month, &bookings, &selection, today)
        .map_err(|e| e.to_string())?;
    to_json(&overview)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether the candidate range is free of bookings and their cleaning days.
///
/// `bookings_json` is a JSON array of `{id, start, end, owner_id}` objects.
/// A missing `start` or `end` yields `false`.
#[wasm_bindgen(js_name = "isRangeFree")]
pub fn is_range_free(
    start: Option<String>,
    end: Option<String>,
    bookings_json: &str,
    buffer_days: u32,
) -> Result<bool, JsValue> {
    is_range_free_inner(start.as_deref(), end.as_deref(), bookings_json, buffer_days)
        .map_err(|e| JsValue::from_str(&e))
}

/// Check the candidate range and report conflicting bookings.
///
/// Returns a JSON string `{free, status, conflicts}` where `status` is one of
/// `incomplete`, `inverted`, `conflicts` or `free`.
#[wasm_bindgen(js_name = "checkRange")]
pub fn check_range(
    start: Option<String>,
    end: Option<String>,
    bookings_json: &str,
    buffer_days: u32,
) -> Result<String, JsValue> {
    check_range_json(start.as_deref(), end.as_deref(), bookings_json, buffer_days)
        .map_err(|e| JsValue::from_str(&e))
}

/// Months touched by the range, as a JSON array of `{year, number}` with
/// zero-based `number`.
#[wasm_bindgen(js_name = "affectedMonths")]
pub fn affected_months(start: Option<String>, end: Option<String>) -> Result<String, JsValue> {
    affected_months_json(start.as_deref(), end.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// The booking window to load for the range, as JSON `{from, to}` or `null`.
///
/// Pass the same `buffer_days` used for `isRangeFree`.
#[wasm_bindgen(js_name = "fetchWindow")]
pub fn fetch_window(
    start: Option<String>,
    end: Option<String>,
    buffer_days: u32,
    lookahead_months: u32,
) -> Result<String, JsValue> {
    fetch_window_json(start.as_deref(), end.as_deref(), buffer_days, lookahead_months)
        .map_err(|e| JsValue::from_str(&e))
}

/// The calendar overview of a month as JSON.
///
/// `month_number` is zero-based (0 = January).
#[wasm_bindgen(js_name = "monthOverview")]
pub fn month_overview(
    month_number: u32,
    year: i32,
    bookings_json: &str,
    start: Option<String>,
    end: Option<String>,
    today: &str,
) -> Result<String, JsValue> {
    month_overview_json(
        month_number,
        year,
        bookings_json,
        start.as_deref(),
        end.as_deref(),
        today,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// The calendar's two-click range selector.
#[wasm_bindgen(js_name = "RangeSelector")]
#[derive(Default)]
pub struct WasmRangeSelector {
    inner: booking_engine::RangeSelector,
}

#[wasm_bindgen(js_class = "RangeSelector")]
impl WasmRangeSelector {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on `day`; returns the new state as JSON.
    pub fn select(&mut self, day: &str) -> Result<String, JsValue> {
        self.select_inner(day).map_err(|e| JsValue::from_str(&e))
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// The current selection as JSON `{start, end}`.
    #[wasm_bindgen(js_name = "currentSelection")]
    pub fn current_selection(&self) -> Result<String, JsValue> {
        to_json(&self.inner.current_selection()).map_err(|e| JsValue::from_str(&e))
    }

    /// Every selected day as a JSON array.
    #[wasm_bindgen(js_name = "selectedDates")]
    pub fn selected_dates(&self) -> Result<String, JsValue> {
        to_json(&self.inner.selected_dates()).map_err(|e| JsValue::from_str(&e))
    }
}

impl WasmRangeSelector {
    fn select_inner(&mut self, day: &str) -> Result<String, String> {
        let day = booking_engine::parse_day(day).map_err(|e| e.to_string())?;
        to_json(&self.inner.select(day))
    }
}
