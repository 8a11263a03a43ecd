//! Elo rating updates for pairwise comparisons.

use crate::models::Winner;

/// Maximum rating points transferable in a single comparison.
pub const K_FACTOR: f64 = 32.0;

/// Rating assigned to every submission when a day's ranking is initialized.
pub const DEFAULT_RATING: i32 = 1000;

/// Probability that a player at `rating` beats one at `opponent_rating`.
/// `expected_score(a, b) + expected_score(b, a) == 1` for all inputs.
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / 400.0))
}

/// Signed integer rating delta for one party of a comparison.
pub fn rating_change(player_rating: i32, opponent_rating: i32, won: bool) -> i32 {
    let expected = expected_score(player_rating as f64, opponent_rating as f64);
    let score = if won { 1.0 } else { 0.0 };
    (K_FACTOR * (score - expected)).round() as i32
}

/// New ratings for both parties after one comparison, each rounded to the
/// nearest integer. The pre-rounding deltas cancel exactly (zero-sum); the
/// rounded sum may drift by at most one point.
pub fn apply_comparison(rating_a: i32, rating_b: i32, winner: Winner) -> (i32, i32) {
    let a_won = winner == Winner::A;
    let new_a = rating_a + rating_change(rating_a, rating_b, a_won);
    let new_b = rating_b + rating_change(rating_b, rating_a, !a_won);
    (new_a, new_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_scores_sum_to_one() {
        for (a, b) in [(1000.0, 1000.0), (500.0, 2000.0), (-100.0, 3000.0), (1200.0, 800.0)] {
            let sum = expected_score(a, b) + expected_score(b, a);
            assert!((sum - 1.0).abs() < 1e-12, "sum was {sum} for ({a}, {b})");
        }
    }

    #[test]
    fn equal_ratings_a_wins() {
        assert_eq!(apply_comparison(1000, 1000, Winner::A), (1016, 984));
    }

    #[test]
    fn equal_ratings_b_wins() {
        assert_eq!(apply_comparison(1000, 1000, Winner::B), (984, 1016));
    }

    #[test]
    fn deltas_cancel_before_rounding() {
        for (a, b) in [(1000, 1000), (500, 2000), (1100, 900), (-50, 300)] {
            let expected_a = expected_score(a as f64, b as f64);
            let expected_b = expected_score(b as f64, a as f64);
            let delta_winner = K_FACTOR * (1.0 - expected_a);
            let delta_loser = K_FACTOR * (0.0 - expected_b);
            assert!((delta_winner + delta_loser).abs() < 1e-12);
        }
    }

    #[test]
    fn underdog_upset_transfers_nearly_k() {
        let (underdog, favorite) = apply_comparison(500, 2000, Winner::A);
        assert!(underdog - 500 > 30, "underdog gained {}", underdog - 500);
        assert!(2000 - favorite > 30, "favorite lost {}", 2000 - favorite);
    }

    #[test]
    fn expected_outcome_moves_almost_nothing() {
        let (favorite, underdog) = apply_comparison(2000, 500, Winner::A);
        assert!(favorite - 2000 <= 1);
        assert!(500 - underdog <= 1);
    }

    #[test]
    fn change_is_symmetric_for_equal_ratings() {
        let gain = rating_change(1000, 1000, true);
        let loss = rating_change(1000, 1000, false);
        assert_eq!(gain, 16);
        assert_eq!(gain, -loss);
    }
}
