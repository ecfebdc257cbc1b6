//! Timestamp parsing for trip start/end columns.

use anyhow::{Result, bail};
use chrono::NaiveDateTime;

/// Formats seen across the city exports. `%.f` also accepts a missing
/// fractional part.
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a trip timestamp such as `2017-01-01 00:07:57`.
///
/// # Errors
///
/// Returns an error if the text matches none of the known formats.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    for fmt in FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(ts);
        }
    }
    bail!("unrecognised timestamp '{text}'")
}
