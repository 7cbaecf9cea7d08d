//! Rank assignment and movement between round snapshots.

use matchday_server::game::standings::{assign_ranks, movement};

#[test]
fn descending_points_get_sequential_ranks() {
    assert_eq!(assign_ranks(&[12, 9, 7]), vec![1, 2, 3]);
}

#[test]
fn tied_points_share_a_rank_and_the_next_skips() {
    // standard competition ranking: 1,2,2,4
    assert_eq!(assign_ranks(&[15, 11, 11, 8]), vec![1, 2, 2, 4]);
}

#[test]
fn empty_table_gives_no_ranks() {
    assert!(assign_ranks(&[]).is_empty());
}

#[test]
fn movement_is_previous_minus_current() {
    assert_eq!(movement(Some(7), 3), Some(4)); // climbed four places
    assert_eq!(movement(Some(2), 5), Some(-3)); // dropped three
    assert_eq!(movement(Some(4), 4), Some(0)); // held position
}

#[test]
fn debutants_have_no_movement() {
    assert_eq!(movement(None, 1), None);
}
