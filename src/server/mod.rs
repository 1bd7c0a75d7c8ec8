pub mod api;

use crate::analytics::CorrelationMatrix;
use crate::config::Config;
use crate::services::IngestionOrchestrator;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

/// Which external integrations were configured at startup, for /health.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationStatus {
    pub primary_configured: bool,
    pub secondary_configured: bool,
    pub generative_configured: bool,
}

impl IntegrationStatus {
    pub fn from_config(config: &Config) -> Self {
        Self {
            primary_configured: config.finnhub_key().is_some(),
            secondary_configured: config.fmp_key().is_some(),
            generative_configured: config.generative_url().is_some(),
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<IngestionOrchestrator>,
    pub matrix: Arc<CorrelationMatrix>,
    pub integrations: IntegrationStatus,
    pub started: Instant,
}

/// Start the axum server
pub async fn serve(
    orchestrator: Arc<IngestionOrchestrator>,
    matrix: Arc<CorrelationMatrix>,
    integrations: IntegrationStatus,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting macropulse server");

    let app_state = AppState {
        orchestrator,
        matrix,
        integrations,
        started: Instant::now(),
    };

    // The API is read-only and meant for dashboard frontends; allow any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET /calendar?from=2026-08-03&to=2026-08-10");
    tracing::info!("  GET /central-banks?from=2026-08-03&to=2026-08-10");
    tracing::info!("  GET /correlations?top=10");
    tracing::info!("  GET /chains");
    tracing::info!("  GET /health");

    let app = axum::Router::new()
        .route("/calendar", axum::routing::get(api::get_calendar_handler))
        .route(
            "/central-banks",
            axum::routing::get(api::get_central_banks_handler),
        )
        .route(
            "/correlations",
            axum::routing::get(api::get_correlations_handler),
        )
        .route("/chains", axum::routing::get(api::get_chains_handler))
        .route("/health", axum::routing::get(api::health_handler))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
