//! OptiCare Server - Clinic Management System
//!
//! REST API backend for a multi-branch optical retail and eyewear clinic.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opticare_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{realtime::RealtimeService, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("opticare_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OptiCare Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Initialize Redis connection for realtime notifications
    let realtime = RealtimeService::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, realtime);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Appointment availability
        .route("/appointments/availability", get(api::availability::get_availability))
        .route("/appointments/weekly-schedule", get(api::availability::get_weekly_schedule))
        // Branches
        .route("/branches", get(api::branches::list_branches))
        .route("/branches", post(api::branches::create_branch))
        .route("/branches/public", get(api::branches::list_public_branches))
        .route("/branches/:id", get(api::branches::get_branch))
        .route("/branches/:id", put(api::branches::update_branch))
        .route("/branches/:id", delete(api::branches::delete_branch))
        // Manufacturers
        .route("/manufacturers", get(api::manufacturers::list_manufacturers))
        .route("/manufacturers", post(api::manufacturers::create_manufacturer))
        .route("/manufacturers/directory", get(api::manufacturers::get_directory))
        .route(
            "/manufacturers/product-line/:product_line",
            get(api::manufacturers::list_by_product_line),
        )
        .route("/manufacturers/:id", get(api::manufacturers::get_manufacturer))
        .route("/manufacturers/:id", put(api::manufacturers::update_manufacturer))
        .route("/manufacturers/:id", delete(api::manufacturers::delete_manufacturer))
        // Role requests
        .route("/role-requests", post(api::role_requests::create_role_request))
        .route("/role-requests", get(api::role_requests::list_role_requests))
        .route("/role-requests/status/:email", get(api::role_requests::get_role_request_status))
        .route("/role-requests/:id/approve", post(api::role_requests::approve_role_request))
        .route("/role-requests/:id/reject", post(api::role_requests::reject_role_request))
        // Eyewear
        .route("/eyewear/reminders", get(api::eyewear::get_reminders))
        .route("/eyewear/:eyewear_id/condition-form", post(api::eyewear::submit_condition_form))
        .route(
            "/eyewear/:eyewear_id/set-appointment",
            post(api::eyewear::schedule_eyewear_appointment),
        )
        // Analytics and reports
        .route("/analytics", get(api::reports::get_analytics))
        .route("/reports/analytics", get(api::reports::download_analytics_report))
        .route("/reports/system-stats", get(api::reports::get_system_stats))
        .route("/reports/reservation-logs", get(api::reports::get_reservation_logs))
        .route("/reports/user-activity", get(api::reports::get_user_activity))
        .route("/reports/revenue", get(api::reports::get_revenue_report))
        .route("/reports/appointment-logs", get(api::reports::get_appointment_logs))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
