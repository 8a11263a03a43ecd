use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::submission::CreateSubmissionRequest;
use crate::error::{Result, StorageError};
use crate::models::Submission;

/// An eligible submission as seen by the pair selector: identity, display
/// fields, and how often it has been compared so far.
#[derive(Debug, Clone, FromRow)]
pub struct EligibleSubmission {
    pub submission_id: Uuid,
    pub title: String,
    pub image_key: String,
    pub vote_count: i32,
}

pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        challenge_date: NaiveDate,
        request: &CreateSubmissionRequest,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, challenge_date, title, image_key)
            VALUES ($1, $2, $3, $4)
            RETURNING submission_id, user_id, challenge_date, title, image_key,
                      included_in_ranking, created_at
            "#,
        )
        .bind(user_id)
        .bind(challenge_date)
        .bind(&request.title)
        .bind(&request.image_key)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::ConstraintViolation(format!(
                    "User already has a submission for {challenge_date}"
                ))
            } else {
                e
            }
        })?;

        Ok(submission)
    }

    pub async fn list_for_day(&self, challenge_date: NaiveDate) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT submission_id, user_id, challenge_date, title, image_key,
                   included_in_ranking, created_at
            FROM submissions
            WHERE challenge_date = $1
            ORDER BY created_at, submission_id
            "#,
        )
        .bind(challenge_date)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    pub async fn count_for_day(
        &self,
        challenge_date: NaiveDate,
        excluding_user: Option<Uuid>,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM submissions
            WHERE challenge_date = $1
              AND ($2::uuid IS NULL OR user_id <> $2)
            "#,
        )
        .bind(challenge_date)
        .bind(excluding_user)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Submissions the given voter may be shown: everyone's but their own,
    /// with current comparison counts (zero before the first rating write).
    pub async fn list_eligible_for_voter(
        &self,
        challenge_date: NaiveDate,
        voter_id: Uuid,
    ) -> Result<Vec<EligibleSubmission>> {
        let submissions = sqlx::query_as::<_, EligibleSubmission>(
            r#"
            SELECT s.submission_id, s.title, s.image_key,
                   COALESCE(r.vote_count, 0) AS vote_count
            FROM submissions s
            LEFT JOIN rating_records r
                   ON r.submission_id = s.submission_id
                  AND r.challenge_date = s.challenge_date
            WHERE s.challenge_date = $1 AND s.user_id <> $2
            ORDER BY s.submission_id
            "#,
        )
        .bind(challenge_date)
        .bind(voter_id)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    pub async fn mark_included_in_ranking(
        &self,
        user_id: Uuid,
        challenge_date: NaiveDate,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET included_in_ranking = TRUE
            WHERE user_id = $1 AND challenge_date = $2
            RETURNING submission_id, user_id, challenge_date, title, image_key,
                      included_in_ranking, created_at
            "#,
        )
        .bind(user_id)
        .bind(challenge_date)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }
}
