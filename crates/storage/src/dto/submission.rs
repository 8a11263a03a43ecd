use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Submission;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    /// Opaque key into the image store, produced by the upload flow.
    #[validate(length(min = 1, max = 500, message = "image_key must be 1-500 characters"))]
    pub image_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub challenge_date: NaiveDate,
    pub title: String,
    pub image_key: String,
    pub included_in_ranking: bool,
    pub created_at: NaiveDateTime,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            submission_id: s.submission_id,
            user_id: s.user_id,
            challenge_date: s.challenge_date,
            title: s.title,
            image_key: s.image_key,
            included_in_ranking: s.included_in_ranking,
            created_at: s.created_at,
        }
    }
}
