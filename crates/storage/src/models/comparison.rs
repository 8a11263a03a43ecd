use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One recorded pairwise outcome. Append-only; a voter gets exactly one row
/// per unordered pair, enforced by a unique index.
///
/// `winner = None` is a skip: the pair will not be surfaced again, but the
/// outcome moves no ratings and counts toward no quota.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comparison {
    pub comparison_id: Uuid,
    pub voter_id: Uuid,
    pub challenge_date: NaiveDate,
    pub submission_a: Uuid,
    pub submission_b: Uuid,
    pub winner: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

/// Which side of a pair won the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    A,
    B,
}
