//! The kickoff and movement strings are rendered verbatim by clients.

use matchday_server::display::{format_kickoff, movement_indicator};

#[test]
fn kickoff_missing_input() {
    assert_eq!(format_kickoff(None), "Date unavailable");
}

#[test]
fn kickoff_unparseable_input() {
    assert_eq!(format_kickoff(Some("not a date")), "Invalid Date");
    assert_eq!(format_kickoff(Some("")), "Invalid Date");
}

#[test]
fn kickoff_en_gb_24_hour() {
    assert_eq!(
        format_kickoff(Some("2026-08-03T19:45:00Z")),
        "3 Aug 2026, 19:45"
    );
    // afternoon stays on the 24-hour clock
    assert_eq!(
        format_kickoff(Some("2026-12-26T15:00:00Z")),
        "26 Dec 2026, 15:00"
    );
}

#[test]
fn kickoff_accepts_sql_timestamp_format() {
    assert_eq!(
        format_kickoff(Some("2026-08-03 19:45:00")),
        "3 Aug 2026, 19:45"
    );
}

#[test]
fn movement_flat_or_unknown_is_a_dash() {
    assert_eq!(movement_indicator(None), "–");
    assert_eq!(movement_indicator(Some(0)), "–");
}

#[test]
fn movement_up_and_down_arrows() {
    assert_eq!(movement_indicator(Some(3)), "▲3");
    assert_eq!(movement_indicator(Some(-2)), "▼2");
}
