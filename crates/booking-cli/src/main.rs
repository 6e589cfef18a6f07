//! `booking` CLI — check date ranges against bookings and print calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Is 2024-06-07..2024-06-10 free, given the bookings in a file?
//! booking check -b bookings.json --start 2024-06-07 --end 2024-06-10
//!
//! # Same, bookings on stdin and two cleaning days
//! cat bookings.json | booking check --start 2024-06-07 --end 2024-06-10 --buffer-days 2
//!
//! # Months to load for a selection, and the padded fetch window
//! booking months --start 2024-01-15 --end 2024-03-10
//!
//! # Text calendar for June 2024 with a selection
//! booking overview -b bookings.json --month 2024-06 --start 2024-06-10 --end 2024-06-12
//!
//! # Replay calendar clicks through the range selector
//! booking select --click 2024-05-10 --click 2024-05-15
//! ```
//!
//! Bookings are a JSON array of `{id, start, end, owner_id}` records. Dates
//! may be `YYYY-MM-DD` or RFC 3339 timestamps (reduced to their UTC day).

use std::io::{self, Read};

use anyhow::{Context, Result};
use booking_engine::{
    affected_months, check_range, fetch_window, month_overview, parse_day, Booking, DateRange,
    EngineConfig, Month, MonthOverview, RangeSelector,
};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Booking availability and calendar CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (`buffer_days`, `lookahead_months`)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a date range is free of bookings and cleaning days
    Check {
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
        /// First day of the requested range
        #[arg(long)]
        start: Option<String>,
        /// Last day of the requested range
        #[arg(long)]
        end: Option<String>,
        /// Cleaning days after each booking (overrides the config file)
        #[arg(long)]
        buffer_days: Option<u32>,
    },
    /// List the months a range touches and the booking window to fetch
    Months {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Extra months to fetch past the last one (overrides the config file)
        #[arg(long)]
        lookahead: Option<u32>,
        /// Cleaning days after each booking (overrides the config file)
        #[arg(long)]
        buffer_days: Option<u32>,
    },
    /// Print the calendar of one month
    Overview {
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
        /// Month to show, as YYYY-MM
        #[arg(long)]
        month: String,
        /// First selected day
        #[arg(long)]
        start: Option<String>,
        /// Last selected day
        #[arg(long)]
        end: Option<String>,
        /// Day to mark as today (defaults to the local date)
        #[arg(long)]
        today: Option<String>,
        /// Print the overview as JSON instead of a text calendar
        #[arg(long)]
        json: bool,
    },
    /// Replay day clicks through the range selector
    Select {
        /// A clicked day; repeat in click order
        #[arg(long = "click", required = true)]
        clicks: Vec<String>,
    },
}

/// Booking record as delivered by the data layer.
#[derive(Deserialize)]
struct BookingInput {
    id: String,
    start: String,
    end: String,
    #[serde(alias = "ownerId", alias = "userId")]
    owner_id: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "loaded engine config");

    match cli.command {
        Commands::Check {
            bookings,
            start,
            end,
            buffer_days,
        } => {
            let bookings = read_bookings(bookings.as_deref())?;
            let candidate = parse_range(start.as_deref(), end.as_deref())?;
            let buffer_days = buffer_days.unwrap_or(config.buffer_days);

            let result = check_range(&candidate, &bookings, buffer_days);
            let conflicts: Vec<&str> = result.conflicts().iter().map(|b| b.id.as_str()).collect();
            let report = json!({
                "free": result.is_free(),
                "status": result.status(),
                "conflicts": conflicts,
                "buffer_days": buffer_days,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Months {
            start,
            end,
            lookahead,
            buffer_days,
        } => {
            let range = parse_range(start.as_deref(), end.as_deref())?;
            let lookahead = lookahead.unwrap_or(config.lookahead_months);
            let buffer_days = buffer_days.unwrap_or(config.buffer_days);
            let window = fetch_window(&range, buffer_days, lookahead)
                .context("Failed to compute the fetch window")?;
            let report = json!({
                "months": affected_months(&range),
                "fetch_window": window,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Overview {
            bookings,
            month,
            start,
            end,
            today,
            json,
        } => {
            let month: Month = month
                .parse()
                .with_context(|| format!("Invalid --month: {}", month))?;
            let bookings = read_bookings(bookings.as_deref())?;
            let selection = parse_range(start.as_deref(), end.as_deref())?;
            let today = match today {
                Some(day) => parse_day(&day).context("Invalid --today")?,
                None => chrono::Local::now().date_naive(),
            };

            let overview = month_overview(month, &bookings, &selection, today)
                .context("Failed to build month overview")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print!("{}", render_calendar(&overview));
            }
        }
        Commands::Select { clicks } => {
            let mut selector = RangeSelector::new();
            for click in &clicks {
                let day = parse_day(click).with_context(|| format!("Invalid --click: {}", click))?;
                selector.select(day);
            }
            let report = json!({
                "state": selector.state(),
                "selection": selector.current_selection(),
                "selected_dates": selector.selected_dates(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let start = start
        .map(parse_day)
        .transpose()
        .context("Invalid --start")?;
    let end = end.map(parse_day).transpose().context("Invalid --end")?;
    Ok(DateRange::new(start, end))
}

/// Read and validate the booking snapshot. Empty input means no bookings.
fn read_bookings(path: Option<&str>) -> Result<Vec<Booking>> {
    let json = read_input(path)?;
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let inputs: Vec<BookingInput> =
        serde_json::from_str(&json).context("Failed to parse bookings JSON")?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_day(&input.start)
                .with_context(|| format!("Booking '{}' has an invalid start", input.id))?;
            let end = parse_day(&input.end)
                .with_context(|| format!("Booking '{}' has an invalid end", input.id))?;
            Ok(Booking::new(input.id, start, end, input.owner_id)?)
        })
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Render a month as text, one row per week.
///
/// Each cell is `>` for today, the day number, then `#` booked, `*` selected
/// or `!` for both. Days outside the month are left blank.
fn render_calendar(overview: &MonthOverview) -> String {
    const HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

    let mut out = format!("{}\n", overview.month);
    let header: Vec<String> = HEADER.iter().map(|name| format!(" {} ", name)).collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    for week in &overview.weeks {
        let cells: Vec<String> = week
            .days
            .iter()
            .map(|day| {
                if !day.in_shown_month {
                    return "    ".to_string();
                }
                let prefix = if day.is_today { '>' } else { ' ' };
                let marker = match (day.booked, day.selected) {
                    (true, true) => '!',
                    (true, false) => '#',
                    (false, true) => '*',
                    (false, false) => ' ',
                };
                format!("{}{:>2}{}", prefix, day.date.day(), marker)
            })
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }
    out
}
