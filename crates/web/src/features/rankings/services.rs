use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::ranking::DailyRankingResponse, error::Result, services::rank_resolution,
};

/// Published ranking for a day
pub async fn get_ranking(pool: &PgPool, date: NaiveDate) -> Result<DailyRankingResponse> {
    rank_resolution::get_ranking(pool, date).await
}

/// Compute and persist final ranks; idempotent over unchanged ratings
pub async fn resolve_ranking(pool: &PgPool, date: NaiveDate) -> Result<DailyRankingResponse> {
    rank_resolution::resolve_final_ranks(pool, date).await
}

/// Create default rating records for the day's submissions
pub async fn initialize_challenge(pool: &PgPool, date: NaiveDate) -> Result<u64> {
    rank_resolution::initialize_challenge(pool, date).await
}
