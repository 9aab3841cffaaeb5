//! docuflow server binary.
//!
//! Wires configuration, the PostgreSQL pool, the review handlers, and the
//! axum router together, then serves the REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docuflow::adapters::{
    review_routes, PostgresAssignmentRepository, PostgresDocumentRepository, PostgresUserReader,
    ReviewHandlers, WebhookNotificationSender,
};
use docuflow::application::handlers::review::{
    BeginReviewCycleHandler, ForceCompleteReviewHandler, GetAssignmentsHandler,
    PurgeDuplicateAssignmentsHandler, PurgeOrphanedAssignmentsHandler, ResetReviewCycleHandler,
    UpdateAssignmentStatusHandler,
};
use docuflow::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!(
        environment = ?config.server.environment,
        "Starting docuflow server"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let assignments = Arc::new(PostgresAssignmentRepository::new(pool.clone()));
    let documents = Arc::new(PostgresDocumentRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserReader::new(pool.clone()));
    let notifier = Arc::new(WebhookNotificationSender::from_config(&config.notification)?);

    let handlers = ReviewHandlers::new(
        Arc::new(BeginReviewCycleHandler::new(
            assignments.clone(),
            documents.clone(),
            notifier.clone(),
        )),
        Arc::new(UpdateAssignmentStatusHandler::new(
            assignments.clone(),
            documents.clone(),
            users.clone(),
            notifier.clone(),
        )),
        Arc::new(GetAssignmentsHandler::new(
            assignments.clone(),
            documents.clone(),
        )),
        Arc::new(PurgeOrphanedAssignmentsHandler::new(assignments.clone())),
        Arc::new(PurgeDuplicateAssignmentsHandler::new(assignments.clone())),
        Arc::new(ForceCompleteReviewHandler::new(assignments.clone())),
        Arc::new(ResetReviewCycleHandler::new(
            assignments.clone(),
            documents.clone(),
        )),
    );

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(tower_http::cors::Any);
    for origin in config.server.cors_origins_list() {
        if let Ok(value) = origin.parse::<HeaderValue>() {
            cors = cors.allow_origin(value);
        }
    }

    let app = Router::new()
        .nest("/api", review_routes(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
