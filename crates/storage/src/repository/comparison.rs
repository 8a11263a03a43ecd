use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Comparison;

pub struct ComparisonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ComparisonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every pair this voter has already been shown for the day, skips
    /// included, in the order they were stored.
    pub async fn seen_pairs(
        &self,
        voter_id: Uuid,
        challenge_date: NaiveDate,
    ) -> Result<Vec<(Uuid, Uuid)>> {
        let pairs = sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
            SELECT submission_a, submission_b
            FROM comparisons
            WHERE voter_id = $1 AND challenge_date = $2
            "#,
        )
        .bind(voter_id)
        .bind(challenge_date)
        .fetch_all(self.pool)
        .await?;

        Ok(pairs)
    }

    pub async fn list_for_voter(
        &self,
        voter_id: Uuid,
        challenge_date: NaiveDate,
    ) -> Result<Vec<Comparison>> {
        let comparisons = sqlx::query_as::<_, Comparison>(
            r#"
            SELECT comparison_id, voter_id, challenge_date, submission_a,
                   submission_b, winner, created_at
            FROM comparisons
            WHERE voter_id = $1 AND challenge_date = $2
            ORDER BY created_at, comparison_id
            "#,
        )
        .bind(voter_id)
        .bind(challenge_date)
        .fetch_all(self.pool)
        .await?;

        Ok(comparisons)
    }
}
