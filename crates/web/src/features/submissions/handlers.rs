use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use storage::{
    Database,
    dto::submission::{CreateSubmissionRequest, SubmissionResponse},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::identity::UserId;

use super::services;
use super::services::EnrollRequest;

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created for today's challenge", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or malformed user identity"),
        (status = 409, description = "User already submitted today")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    UserId(user_id): UserId,
    Json(request): Json<CreateSubmissionRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let today = Utc::now().date_naive();
    let submission = services::create_submission(db.pool(), user_id, today, &request).await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(submission))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/enroll",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Today's submission opted into the ranking", body = SubmissionResponse),
        (status = 404, description = "User has no submission today"),
        (status = 409, description = "Pool is large enough for pairwise voting")
    ),
    tag = "submissions"
)]
pub async fn enroll_submission(
    State(db): State<Database>,
    UserId(user_id): UserId,
    Json(request): Json<EnrollRequest>,
) -> Result<Response, WebError> {
    let today = Utc::now().date_naive();
    let submission = services::enroll(db.pool(), user_id, today, &request).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{date}",
    params(
        ("date" = NaiveDate, Path, description = "Challenge-day (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Submissions for the challenge-day", body = Vec<SubmissionResponse>)
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(db): State<Database>,
    Path(date): Path<NaiveDate>,
) -> Result<Response, WebError> {
    let submissions = services::list_submissions(db.pool(), date).await?;

    let response: Vec<SubmissionResponse> = submissions
        .into_iter()
        .map(SubmissionResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
