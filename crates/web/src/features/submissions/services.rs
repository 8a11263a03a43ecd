use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use storage::{
    dto::submission::CreateSubmissionRequest,
    error::{Result, StorageError},
    models::Submission,
    repository::submission::SubmissionRepository,
};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    /// The challenge-day whose pool was too small for pairwise voting.
    pub challenge_date: NaiveDate,
}

/// Create the caller's submission for today's challenge.
pub async fn create_submission(
    pool: &PgPool,
    user_id: Uuid,
    today: NaiveDate,
    request: &CreateSubmissionRequest,
) -> Result<Submission> {
    let repo = SubmissionRepository::new(pool);
    repo.create(user_id, today, request).await
}

/// Bootstrap opt-in: when the named day's pool offers the caller fewer than
/// two other submissions to compare, their own submission for today enters
/// the ranking without voting.
pub async fn enroll(
    pool: &PgPool,
    user_id: Uuid,
    today: NaiveDate,
    request: &EnrollRequest,
) -> Result<Submission> {
    let repo = SubmissionRepository::new(pool);

    let others = repo
        .count_for_day(request.challenge_date, Some(user_id))
        .await?;
    if others >= 2 {
        return Err(StorageError::ConstraintViolation(format!(
            "Challenge-day {} has enough submissions for pairwise voting; enter the ranking by voting",
            request.challenge_date
        )));
    }

    repo.mark_included_in_ranking(user_id, today).await
}

/// List a day's submissions
pub async fn list_submissions(pool: &PgPool, challenge_date: NaiveDate) -> Result<Vec<Submission>> {
    let repo = SubmissionRepository::new(pool);
    repo.list_for_day(challenge_date).await
}
