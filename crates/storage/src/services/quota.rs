//! Pair counting and the dynamic vote quota.

/// Cap on the number of comparisons a voter must complete in one day.
pub const DEFAULT_REQUIRED_VOTES: i64 = 5;

/// Smallest pool for which the quota saturates at the cap
/// (total_pairs(5) = 10 >= 5).
pub const MIN_SUBMISSIONS_FOR_RANKING: i64 = 5;

/// Number of unique unordered pairs among `n` submissions.
pub fn total_pairs(n: i64) -> i64 {
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}

/// Non-skip comparisons required before the voter's own submission enters
/// the ranking. Never exceeds the number of available pairs, so exhausting
/// the pool always satisfies the quota.
pub fn required_votes(n: i64) -> i64 {
    if n == 0 {
        return 0;
    }

    DEFAULT_REQUIRED_VOTES.min(total_pairs(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_counts() {
        assert_eq!(total_pairs(0), 0);
        assert_eq!(total_pairs(1), 0);
        assert_eq!(total_pairs(2), 1);
        assert_eq!(total_pairs(3), 3);
        assert_eq!(total_pairs(4), 6);
        assert_eq!(total_pairs(5), 10);
        assert_eq!(total_pairs(10), 45);
    }

    #[test]
    fn quota_follows_pool_size() {
        assert_eq!(required_votes(0), 0);
        assert_eq!(required_votes(1), 0);
        assert_eq!(required_votes(2), 1);
        assert_eq!(required_votes(3), 3);
        assert_eq!(required_votes(4), 5);
        assert_eq!(required_votes(5), 5);
        assert_eq!(required_votes(100), 5);
    }

    #[test]
    fn quota_never_exceeds_available_pairs() {
        assert_eq!(required_votes(0), 0);
        assert_eq!(required_votes(1), 0);
        for n in 2..50 {
            assert!(required_votes(n) <= total_pairs(n));
        }
    }
}
