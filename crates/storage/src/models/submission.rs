use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One artwork entered into a daily challenge.
///
/// At most one per (user, challenge_date). Immutable after creation except
/// for `included_in_ranking`, which flips to true once the owner earns entry
/// into the day's ranking (or opts in during bootstrap).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub challenge_date: NaiveDate,
    pub title: String,
    /// Opaque reference into the image store; never interpreted here.
    pub image_key: String,
    pub included_in_ranking: bool,
    pub created_at: NaiveDateTime,
}
