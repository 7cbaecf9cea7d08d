//! Verifies the per-fixture scoring rules.

use matchday_server::game::scoring::{fixture_points, outcome, Outcome};

#[test]
fn exact_scoreline_beats_correct_outcome() {
    assert_eq!(fixture_points(2, 1, 2, 1, false), 3);
    assert_eq!(fixture_points(3, 1, 2, 1, false), 1); // right winner, wrong score
}

#[test]
fn wrong_outcome_scores_nothing() {
    assert_eq!(fixture_points(0, 2, 2, 1, false), 0);
    assert_eq!(fixture_points(1, 1, 2, 1, false), 0); // predicted draw, home won
}

#[test]
fn exact_draw_is_exact_not_just_outcome() {
    assert_eq!(fixture_points(1, 1, 1, 1, false), 3);
    assert_eq!(fixture_points(0, 0, 1, 1, false), 1); // right outcome, wrong draw
}

#[test]
fn joker_doubles_whatever_was_earned() {
    assert_eq!(fixture_points(2, 1, 2, 1, true), 6);
    assert_eq!(fixture_points(3, 1, 2, 1, true), 2);
    assert_eq!(fixture_points(0, 2, 2, 1, true), 0); // doubling zero is zero
}

#[test]
fn outcome_classification() {
    assert_eq!(outcome(2, 0), Outcome::HomeWin);
    assert_eq!(outcome(0, 0), Outcome::Draw);
    assert_eq!(outcome(1, 3), Outcome::AwayWin);
}
