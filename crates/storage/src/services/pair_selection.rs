//! Choosing the next unseen pair for a voter.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vote::{NextPairResponse, PairSubmission, VoteOutcome};
use crate::error::Result;
use crate::repository::comparison::ComparisonRepository;
use crate::repository::submission::{EligibleSubmission, SubmissionRepository};
use crate::repository::voting_progress::VotingProgressRepository;
use crate::services::quota;

/// An unordered pair, stored with the smaller id first so that both
/// orientations of the same comparison collapse onto one key.
pub type PairKey = (Uuid, Uuid);

pub fn normalize_pair(a: Uuid, b: Uuid) -> PairKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Deterministic least-compared-first choice over the unseen pairs.
///
/// Candidates carry their current comparison counts; the pair with the
/// smallest combined count wins, ties broken by ascending id pair. Returns
/// `None` once the voter has seen every pair.
pub fn choose_next_pair(
    candidates: &[(Uuid, i32)],
    seen: &HashSet<PairKey>,
) -> Option<PairKey> {
    let mut best: Option<(i32, PairKey)> = None;

    for (i, &(id_a, votes_a)) in candidates.iter().enumerate() {
        for &(id_b, votes_b) in &candidates[i + 1..] {
            let key = normalize_pair(id_a, id_b);
            if seen.contains(&key) {
                continue;
            }

            let combined = votes_a + votes_b;
            let replace = match best {
                Some((best_combined, best_key)) => (combined, key) < (best_combined, best_key),
                None => true,
            };
            if replace {
                best = Some((combined, key));
            }
        }
    }

    best.map(|(_, key)| key)
}

/// Surface the next pair for `voter_id` on `challenge_date`, or report why
/// none exists. Reads the voter's progress without creating it; the row
/// itself appears on their first comparison or skip.
pub async fn next_pair(
    pool: &PgPool,
    voter_id: Uuid,
    challenge_date: NaiveDate,
) -> Result<NextPairResponse> {
    let submissions = SubmissionRepository::new(pool);
    let eligible = submissions
        .list_eligible_for_voter(challenge_date, voter_id)
        .await?;

    // Bootstrap: nothing to compare until at least two other users have
    // submitted. The caller falls back to opt-in enrollment.
    if eligible.len() < 2 {
        return Ok(NextPairResponse::InsufficientSubmissions);
    }

    let required = quota::required_votes(eligible.len() as i64) as i32;
    let progress = match VotingProgressRepository::new(pool)
        .get(voter_id, challenge_date)
        .await?
    {
        Some(progress) => VoteOutcome {
            vote_count: progress.vote_count,
            required_votes: progress.required_votes,
            entered_ranking: progress.entered_ranking,
        },
        None => VoteOutcome {
            vote_count: 0,
            required_votes: required,
            entered_ranking: false,
        },
    };

    let seen: HashSet<PairKey> = ComparisonRepository::new(pool)
        .seen_pairs(voter_id, challenge_date)
        .await?
        .into_iter()
        .map(|(a, b)| normalize_pair(a, b))
        .collect();

    let candidates: Vec<(Uuid, i32)> = eligible
        .iter()
        .map(|s| (s.submission_id, s.vote_count))
        .collect();

    match choose_next_pair(&candidates, &seen) {
        Some((a, b)) => Ok(NextPairResponse::Pair {
            submission_a: to_pair_submission(&eligible, a),
            submission_b: to_pair_submission(&eligible, b),
            progress,
        }),
        None => Ok(NextPairResponse::NoMorePairs { progress }),
    }
}

fn to_pair_submission(eligible: &[EligibleSubmission], id: Uuid) -> PairSubmission {
    // The id came out of `eligible` moments ago.
    let s = eligible
        .iter()
        .find(|s| s.submission_id == id)
        .expect("selected pair member missing from eligible pool");

    PairSubmission {
        submission_id: s.submission_id,
        title: s.title.clone(),
        image_key: s.image_key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn prefers_least_compared_pair() {
        let ids = ids(3);
        let candidates = vec![(ids[0], 4), (ids[1], 0), (ids[2], 1)];
        let pair = choose_next_pair(&candidates, &HashSet::new()).unwrap();
        assert_eq!(pair, normalize_pair(ids[1], ids[2]));
    }

    #[test]
    fn never_repeats_a_seen_pair() {
        let ids = ids(3);
        let candidates: Vec<(Uuid, i32)> = ids.iter().map(|&id| (id, 0)).collect();
        let mut seen = HashSet::new();

        let mut surfaced = Vec::new();
        while let Some(pair) = choose_next_pair(&candidates, &seen) {
            assert!(!surfaced.contains(&pair));
            surfaced.push(pair);
            seen.insert(pair);
        }

        // 3 candidates -> exactly 3 unique pairs, then exhaustion.
        assert_eq!(surfaced.len(), 3);
        assert_eq!(choose_next_pair(&candidates, &seen), None);
    }

    #[test]
    fn exhaustion_on_too_few_candidates() {
        assert_eq!(choose_next_pair(&[], &HashSet::new()), None);
        assert_eq!(
            choose_next_pair(&[(Uuid::new_v4(), 0)], &HashSet::new()),
            None
        );
    }

    #[test]
    fn deterministic_under_equal_counts() {
        let ids = ids(4);
        let candidates: Vec<(Uuid, i32)> = ids.iter().map(|&id| (id, 2)).collect();
        let first = choose_next_pair(&candidates, &HashSet::new()).unwrap();
        let second = choose_next_pair(&candidates, &HashSet::new()).unwrap();
        assert_eq!(first, second);
        // Lowest id pair wins the tie.
        assert_eq!(first, (ids[0], ids[1]));
    }

    #[test]
    fn seen_pairs_match_either_orientation() {
        let ids = ids(2);
        let candidates = vec![(ids[0], 0), (ids[1], 0)];
        let mut seen = HashSet::new();
        seen.insert(normalize_pair(ids[1], ids[0]));
        assert_eq!(choose_next_pair(&candidates, &seen), None);
    }
}
