use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use chrono_english::{parse_date_string, Dialect};

const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a local wall-clock instant. Exact ISO-like forms are tried first,
/// anything else goes through natural-language parsing relative to now.
pub fn parse_instant(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if let Some(instant) = INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Ok(instant);
    }

    parse_date_string(trimmed, Local::now(), Dialect::Us)
        .map(|dt| dt.naive_local())
        .map_err(|e| anyhow::anyhow!("Failed to parse instant '{}': {}", input, e))
}
