use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;

/// A rating record joined with the display fields of its submission, as
/// consumed by rank resolution and the published-ranking query.
#[derive(Debug, Clone, FromRow)]
pub struct RatedSubmissionRow {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub image_key: String,
    pub rating: i32,
    pub vote_count: i32,
    pub final_rank: Option<i32>,
}

pub struct RatingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create default rating records for every submission of the day that
    /// does not have one yet. Returns the number of records created.
    pub async fn init_for_day(&self, challenge_date: NaiveDate) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO rating_records (submission_id, challenge_date)
            SELECT submission_id, challenge_date
            FROM submissions
            WHERE challenge_date = $1
            ON CONFLICT (submission_id, challenge_date) DO NOTHING
            "#,
        )
        .bind(challenge_date)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Rating state for the day's ranking-eligible submissions.
    pub async fn list_included_for_day(
        &self,
        challenge_date: NaiveDate,
    ) -> Result<Vec<RatedSubmissionRow>> {
        let rows = sqlx::query_as::<_, RatedSubmissionRow>(
            r#"
            SELECT s.submission_id, s.user_id, s.title, s.image_key,
                   r.rating, r.vote_count, r.final_rank
            FROM rating_records r
            INNER JOIN submissions s
                    ON s.submission_id = r.submission_id
                   AND s.challenge_date = r.challenge_date
            WHERE r.challenge_date = $1 AND s.included_in_ranking
            ORDER BY r.rating DESC, s.submission_id
            "#,
        )
        .bind(challenge_date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// The published ranking: only records whose final rank has been set.
    pub async fn list_resolved_for_day(
        &self,
        challenge_date: NaiveDate,
    ) -> Result<Vec<RatedSubmissionRow>> {
        let rows = sqlx::query_as::<_, RatedSubmissionRow>(
            r#"
            SELECT s.submission_id, s.user_id, s.title, s.image_key,
                   r.rating, r.vote_count, r.final_rank
            FROM rating_records r
            INNER JOIN submissions s
                    ON s.submission_id = r.submission_id
                   AND s.challenge_date = r.challenge_date
            WHERE r.challenge_date = $1 AND r.final_rank IS NOT NULL
            ORDER BY r.final_rank, s.submission_id
            "#,
        )
        .bind(challenge_date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
