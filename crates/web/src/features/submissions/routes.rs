use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_submission, enroll_submission, list_submissions};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_submission))
        .route("/enroll", post(enroll_submission))
        .route("/:date", get(list_submissions))
}
