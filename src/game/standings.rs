//! Rank assignment and rank movement between round snapshots.

/// Assign standard competition ranks (1,2,2,4) to a list already sorted by
/// points descending. Returns one rank per input entry.
pub fn assign_ranks(points: &[i64]) -> Vec<i64> {
    let mut ranks = Vec::with_capacity(points.len());
    let mut last_points: Option<i64> = None;
    let mut last_rank: i64 = 0;

    for (idx, &p) in points.iter().enumerate() {
        let rank = match last_points {
            Some(lp) if lp == p => last_rank,
            _ => idx as i64 + 1,
        };
        last_points = Some(p);
        last_rank = rank;
        ranks.push(rank);
    }
    ranks
}

/// Rank delta between two snapshots. Positive = climbed, negative = dropped.
/// `None` when the user has no previous snapshot to compare against.
pub fn movement(prev_rank: Option<i64>, curr_rank: i64) -> Option<i64> {
    prev_rank.map(|p| p - curr_rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_skip_after_ties() {
        assert_eq!(assign_ranks(&[10, 8, 8, 5]), vec![1, 2, 2, 4]);
    }

    #[test]
    fn all_tied_share_first() {
        assert_eq!(assign_ranks(&[7, 7, 7]), vec![1, 1, 1]);
    }

    #[test]
    fn movement_needs_a_previous_snapshot() {
        assert_eq!(movement(None, 3), None);
        assert_eq!(movement(Some(5), 3), Some(2));
        assert_eq!(movement(Some(2), 4), Some(-2));
    }
}
