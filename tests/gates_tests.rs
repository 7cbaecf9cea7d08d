//! Deadline and joker-allowance gates for prediction submission.

use chrono::{Duration, Utc};
use matchday_server::game::gates::{accepts_predictions, joker_allowed};

#[test]
fn open_round_before_deadline_accepts() {
    let now = Utc::now();
    assert!(accepts_predictions("open", now + Duration::hours(1), now));
}

#[test]
fn past_deadline_rejects_even_while_open() {
    let now = Utc::now();
    assert!(!accepts_predictions("open", now - Duration::seconds(1), now));
}

#[test]
fn deadline_itself_is_too_late() {
    let now = Utc::now();
    assert!(!accepts_predictions("open", now, now));
}

#[test]
fn closed_or_completed_round_rejects() {
    let now = Utc::now();
    let future = now + Duration::days(1);
    assert!(!accepts_predictions("closed", future, now));
    assert!(!accepts_predictions("completed", future, now));
}

#[test]
fn joker_limit_zero_rejects_any_joker() {
    assert!(!joker_allowed(true, 0, 0));
}

#[test]
fn toggling_a_joker_off_is_always_allowed() {
    // allowance never applies to a plain prediction
    assert!(joker_allowed(false, 0, 0));
    assert!(joker_allowed(false, 3, 1));
}

#[test]
fn jokers_elsewhere_consume_the_allowance() {
    assert!(joker_allowed(true, 0, 1));
    assert!(!joker_allowed(true, 1, 1));
    assert!(joker_allowed(true, 1, 2));
}
