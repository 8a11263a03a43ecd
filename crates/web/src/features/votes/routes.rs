use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{cast_vote, get_progress, list_history, next_pair};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(cast_vote))
        .route("/next", get(next_pair))
        .route("/progress", get(get_progress))
        .route("/history", get(list_history))
}
