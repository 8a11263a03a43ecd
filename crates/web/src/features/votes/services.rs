use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::vote::{CastVoteRequest, NextPairResponse, VoteOutcome},
    error::Result,
    models::Comparison,
    repository::comparison::ComparisonRepository,
    repository::submission::SubmissionRepository,
    repository::voting_progress::VotingProgressRepository,
    services::{pair_selection, quota, vote_processing},
};
use uuid::Uuid;

/// Record one comparison outcome
pub async fn cast_vote(
    pool: &PgPool,
    voter_id: Uuid,
    today: NaiveDate,
    request: &CastVoteRequest,
) -> Result<VoteOutcome> {
    vote_processing::cast_vote(pool, voter_id, today, request).await
}

/// Surface the next unseen pair for the voter
pub async fn next_pair(
    pool: &PgPool,
    voter_id: Uuid,
    challenge_date: NaiveDate,
) -> Result<NextPairResponse> {
    pair_selection::next_pair(pool, voter_id, challenge_date).await
}

/// Current progress toward the day's quota. Voters who have not engaged yet
/// get a zeroed view with the quota they would face.
pub async fn get_progress(
    pool: &PgPool,
    voter_id: Uuid,
    challenge_date: NaiveDate,
) -> Result<VoteOutcome> {
    let progress = VotingProgressRepository::new(pool)
        .get(voter_id, challenge_date)
        .await?;

    if let Some(progress) = progress {
        return Ok(VoteOutcome {
            vote_count: progress.vote_count,
            required_votes: progress.required_votes,
            entered_ranking: progress.entered_ranking,
        });
    }

    let others = SubmissionRepository::new(pool)
        .count_for_day(challenge_date, Some(voter_id))
        .await?;

    Ok(VoteOutcome {
        vote_count: 0,
        required_votes: quota::required_votes(others) as i32,
        entered_ranking: false,
    })
}

/// The voter's recorded comparisons for the day, skips included
pub async fn list_history(
    pool: &PgPool,
    voter_id: Uuid,
    challenge_date: NaiveDate,
) -> Result<Vec<Comparison>> {
    let repo = ComparisonRepository::new(pool);
    repo.list_for_voter(voter_id, challenge_date).await
}
