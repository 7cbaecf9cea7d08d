//! Presentation helpers shared by API responses.
//!
//! The clients render kickoff times and standings movement exactly as
//! produced here, so the strings are part of the API contract.

use chrono::NaiveDateTime;

/// en-GB kickoff string, e.g. "3 Aug 2026, 19:45" (24-hour clock).
/// Missing input renders as "Date unavailable", unparseable as "Invalid Date".
pub fn format_kickoff(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "Date unavailable".into();
    };

    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"));

    match parsed {
        Ok(dt) => dt.format("%-d %b %Y, %H:%M").to_string(),
        Err(_) => "Invalid Date".into(),
    }
}

/// Movement arrow for standings rows: "–" when flat or unknown,
/// "▲N" for a climb, "▼N" for a drop.
pub fn movement_indicator(movement: Option<i64>) -> String {
    match movement {
        None | Some(0) => "–".into(),
        Some(n) if n > 0 => format!("▲{n}"),
        Some(n) => format!("▼{}", n.abs()),
    }
}
