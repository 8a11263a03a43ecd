use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::vote::{CastVoteRequest, NextPairResponse, VoteOutcome, VotingQuery},
    models::Comparison,
};

use crate::error::WebError;
use crate::middleware::identity::UserId;

use super::services;

#[utoipa::path(
    post,
    path = "/api/votes",
    request_body = CastVoteRequest,
    responses(
        (status = 200, description = "Comparison recorded", body = VoteOutcome),
        (status = 400, description = "Invalid pair or winner"),
        (status = 401, description = "Missing or malformed user identity"),
        (status = 409, description = "Voter already compared this pair")
    ),
    tag = "votes"
)]
pub async fn cast_vote(
    State(db): State<Database>,
    UserId(voter_id): UserId,
    Json(request): Json<CastVoteRequest>,
) -> Result<Response, WebError> {
    request.validate().map_err(WebError::BadRequest)?;

    let today = Utc::now().date_naive();
    let outcome = services::cast_vote(db.pool(), voter_id, today, &request).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    get,
    path = "/api/votes/next",
    params(VotingQuery),
    responses(
        (status = 200, description = "Next unseen pair, or the reason none exists", body = NextPairResponse),
        (status = 401, description = "Missing or malformed user identity")
    ),
    tag = "votes"
)]
pub async fn next_pair(
    State(db): State<Database>,
    UserId(voter_id): UserId,
    Query(query): Query<VotingQuery>,
) -> Result<Response, WebError> {
    let response = services::next_pair(db.pool(), voter_id, query.challenge_date).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/votes/progress",
    params(VotingQuery),
    responses(
        (status = 200, description = "Voting progress for the challenge-day", body = VoteOutcome),
        (status = 401, description = "Missing or malformed user identity")
    ),
    tag = "votes"
)]
pub async fn get_progress(
    State(db): State<Database>,
    UserId(voter_id): UserId,
    Query(query): Query<VotingQuery>,
) -> Result<Response, WebError> {
    let progress = services::get_progress(db.pool(), voter_id, query.challenge_date).await?;

    Ok(Json(progress).into_response())
}

#[utoipa::path(
    get,
    path = "/api/votes/history",
    params(VotingQuery),
    responses(
        (status = 200, description = "Comparisons the voter has recorded for the challenge-day", body = Vec<Comparison>),
        (status = 401, description = "Missing or malformed user identity")
    ),
    tag = "votes"
)]
pub async fn list_history(
    State(db): State<Database>,
    UserId(voter_id): UserId,
    Query(query): Query<VotingQuery>,
) -> Result<Response, WebError> {
    let history = services::list_history(db.pool(), voter_id, query.challenge_date).await?;

    Ok(Json(history).into_response())
}
