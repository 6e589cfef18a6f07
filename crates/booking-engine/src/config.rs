//! Engine settings.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Cleaning days required after every booking.
pub const DEFAULT_BUFFER_DAYS: u32 = 1;

/// Months of bookings to load past the last affected month.
pub const DEFAULT_LOOKAHEAD_MONTHS: u32 = 3;

/// Tunables shared by the validator and the fetch window.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days blocked after each booking's last day.
    pub buffer_days: u32,
    /// Extra months appended to the fetch window.
    pub lookahead_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_days: DEFAULT_BUFFER_DAYS,
            lookahead_months: DEFAULT_LOOKAHEAD_MONTHS,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON, e.g. `{"buffer_days": 2}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
