use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_ranking, initialize_challenge, resolve_ranking};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:date/initialize", post(initialize_challenge))
        .route("/:date/resolve", post(resolve_ranking))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new().route("/:date", get(get_ranking)).merge(protected)
}
