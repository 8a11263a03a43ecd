use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Elo state for one submission within one challenge-day.
///
/// Starts at 1000, moves with every comparison that touches the submission,
/// and is frozen into `final_rank` when the day's ranking is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RatingRecord {
    pub submission_id: Uuid,
    pub challenge_date: NaiveDate,
    pub rating: i32,
    /// Number of comparisons this submission has appeared in.
    pub vote_count: i32,
    pub final_rank: Option<i32>,
    pub updated_at: NaiveDateTime,
}
