//! Points awarded for a single prediction against a final score.

/// Match outcome from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

pub fn outcome(home: i32, away: i32) -> Outcome {
    match home.cmp(&away) {
        std::cmp::Ordering::Greater => Outcome::HomeWin,
        std::cmp::Ordering::Equal => Outcome::Draw,
        std::cmp::Ordering::Less => Outcome::AwayWin,
    }
}

pub const POINTS_EXACT: i32 = 3;
pub const POINTS_OUTCOME: i32 = 1;
pub const JOKER_MULTIPLIER: i32 = 2;

/// Points for one prediction: exact scoreline beats correct outcome,
/// anything else scores nothing. A joker doubles whatever was earned.
pub fn fixture_points(
    pred_home: i32,
    pred_away: i32,
    actual_home: i32,
    actual_away: i32,
    joker: bool,
) -> i32 {
    let base = if pred_home == actual_home && pred_away == actual_away {
        POINTS_EXACT
    } else if outcome(pred_home, pred_away) == outcome(actual_home, actual_away) {
        POINTS_OUTCOME
    } else {
        0
    };

    if joker {
        base * JOKER_MULTIPLIER
    } else {
        base
    }
}
