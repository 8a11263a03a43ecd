use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::submissions::handlers::create_submission,
        features::submissions::handlers::enroll_submission,
        features::submissions::handlers::list_submissions,
        features::votes::handlers::cast_vote,
        features::votes::handlers::next_pair,
        features::votes::handlers::get_progress,
        features::votes::handlers::list_history,
        features::rankings::handlers::get_ranking,
        features::rankings::handlers::resolve_ranking,
        features::rankings::handlers::initialize_challenge,
    ),
    components(
        schemas(
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::vote::CastVoteRequest,
            storage::dto::vote::VoteOutcome,
            storage::dto::vote::NextPairResponse,
            storage::dto::vote::PairSubmission,
            storage::dto::ranking::DailyRankingResponse,
            storage::dto::ranking::RankingEntry,
            storage::dto::ranking::RankedSubmissionInfo,
            features::submissions::services::EnrollRequest,
            storage::models::Submission,
            storage::models::RatingRecord,
            storage::models::Comparison,
            storage::models::VotingProgress,
            storage::models::Winner,
        )
    ),
    tags(
        (name = "submissions", description = "Daily challenge submissions and bootstrap enrollment"),
        (name = "votes", description = "Pairwise comparison voting"),
        (name = "rankings", description = "Challenge-day ranking resolution"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Daily Duel API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/submissions", features::submissions::routes::routes())
        .nest("/api/votes", features::votes::routes::routes())
        .nest("/api/rankings", features::rankings::routes::routes(api_keys))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
