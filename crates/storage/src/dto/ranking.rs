use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingEntry {
    /// 1-based competition rank; tied ratings share a rank.
    pub rank: i32,
    pub rating: i32,
    pub vote_count: i32,
    pub submission: RankedSubmissionInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankedSubmissionInfo {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub image_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyRankingResponse {
    pub challenge_date: NaiveDate,
    pub entries: Vec<RankingEntry>,
}
