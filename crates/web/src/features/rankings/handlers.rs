use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde_json::json;
use storage::{Database, dto::ranking::DailyRankingResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings/{date}",
    params(
        ("date" = NaiveDate, Path, description = "Challenge-day (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Published ranking for the challenge-day", body = DailyRankingResponse),
        (status = 404, description = "Ranking not yet resolved")
    ),
    tag = "rankings"
)]
pub async fn get_ranking(
    State(db): State<Database>,
    Path(date): Path<NaiveDate>,
) -> Result<Response, WebError> {
    let ranking = services::get_ranking(db.pool(), date).await?;

    Ok(Json(ranking).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rankings/{date}/resolve",
    params(
        ("date" = NaiveDate, Path, description = "Challenge-day (YYYY-MM-DD)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Final ranks computed and persisted", body = DailyRankingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No ranking-eligible submissions for the day")
    ),
    tag = "rankings"
)]
pub async fn resolve_ranking(
    State(db): State<Database>,
    Path(date): Path<NaiveDate>,
) -> Result<Response, WebError> {
    let ranking = services::resolve_ranking(db.pool(), date).await?;

    Ok(Json(ranking).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rankings/{date}/initialize",
    params(
        ("date" = NaiveDate, Path, description = "Challenge-day (YYYY-MM-DD)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rating records created for the day's submissions"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Fewer than 2 submissions for the day")
    ),
    tag = "rankings"
)]
pub async fn initialize_challenge(
    State(db): State<Database>,
    Path(date): Path<NaiveDate>,
) -> Result<Response, WebError> {
    let created = services::initialize_challenge(db.pool(), date).await?;

    Ok(Json(json!({ "rating_records_created": created })).into_response())
}
