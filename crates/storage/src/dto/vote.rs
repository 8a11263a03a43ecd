use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CastVoteRequest {
    pub challenge_date: NaiveDate,
    pub submission_a: Uuid,
    pub submission_b: Uuid,
    /// Winning submission id, or null to skip the pair.
    pub winner: Option<Uuid>,
}

impl CastVoteRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.submission_a == self.submission_b {
            return Err("submission_a and submission_b must differ".to_string());
        }

        if let Some(winner) = self.winner
            && winner != self.submission_a
            && winner != self.submission_b
        {
            return Err("winner must be one of the compared submissions".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VotingQuery {
    /// Challenge-day whose pool is being voted on.
    pub challenge_date: NaiveDate,
}

/// Result of recording one comparison outcome.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct VoteOutcome {
    pub vote_count: i32,
    pub required_votes: i32,
    pub entered_ranking: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PairSubmission {
    pub submission_id: Uuid,
    pub title: String,
    pub image_key: String,
}

/// Outcome of asking for the next pair to compare.
///
/// `InsufficientSubmissions` is the bootstrap case: fewer than two
/// submissions from other users exist, so pairwise voting is impossible and
/// the caller should offer opt-in enrollment instead. `NoMorePairs` means
/// the voter has seen every eligible pair.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextPairResponse {
    Pair {
        submission_a: PairSubmission,
        submission_b: PairSubmission,
        progress: VoteOutcome,
    },
    NoMorePairs {
        progress: VoteOutcome,
    },
    InsufficientSubmissions,
}
