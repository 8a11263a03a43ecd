use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-voter progress toward entering a challenge-day's ranking.
///
/// `required_votes` is written once, when the voter first engages with the
/// day, and never recomputed; late submissions cannot move the goalposts.
/// `vote_count` only ever grows and `entered_ranking` never reverts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VotingProgress {
    pub user_id: Uuid,
    pub challenge_date: NaiveDate,
    pub required_votes: i32,
    pub vote_count: i32,
    pub entered_ranking: bool,
    pub created_at: NaiveDateTime,
}
