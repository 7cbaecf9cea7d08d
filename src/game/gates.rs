//! Submission gates evaluated against a round's state.

use chrono::{DateTime, Utc};

/// A round takes predictions only while open and before its deadline.
pub fn accepts_predictions(status: &str, deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    status == "open" && now < deadline
}

/// Whether a submission's joker flag fits the round's allowance.
/// `jokers_elsewhere` counts the user's jokers on the round's other
/// fixtures; submissions without a joker are never limited.
pub fn joker_allowed(is_joker: bool, jokers_elsewhere: i64, limit: i32) -> bool {
    !is_joker || jokers_elsewhere < limit as i64
}
