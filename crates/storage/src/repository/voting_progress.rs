use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::VotingProgress;

pub struct VotingProgressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VotingProgressRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(
        &self,
        user_id: Uuid,
        challenge_date: NaiveDate,
    ) -> Result<Option<VotingProgress>> {
        let progress = sqlx::query_as::<_, VotingProgress>(
            r#"
            SELECT user_id, challenge_date, required_votes, vote_count,
                   entered_ranking, created_at
            FROM voting_progress
            WHERE user_id = $1 AND challenge_date = $2
            "#,
        )
        .bind(user_id)
        .bind(challenge_date)
        .fetch_optional(self.pool)
        .await?;

        Ok(progress)
    }
}
