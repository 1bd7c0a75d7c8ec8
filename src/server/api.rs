use crate::config::resolve_window;
use crate::models::{CentralBankEvent, Correlation, EconomicEvent};
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}

/// Query parameters for /calendar and /central-banks
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Start date (YYYY-MM-DD), default today
    pub from: Option<String>,
    /// End date (YYYY-MM-DD), default from + 7 days
    pub to: Option<String>,
}

/// GET /calendar - the normalized, enriched event list
///
/// Never empty: with no provider configured or reachable the synthetic
/// calendar is served.
pub async fn get_calendar_handler(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<Vec<EconomicEvent>>, (StatusCode, Json<ErrorResponse>)> {
    let (from, to) = resolve_window(params.from.as_deref(), params.to.as_deref())
        .map_err(|e| bad_request(e.to_string()))?;

    debug!("GET /calendar {}..{}", from, to);
    let events = state.orchestrator.get_events(from, to).await;
    Ok(Json(events))
}

/// GET /central-banks - scheduled central-bank events for the window
pub async fn get_central_banks_handler(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<Vec<CentralBankEvent>>, (StatusCode, Json<ErrorResponse>)> {
    let (from, to) = resolve_window(params.from.as_deref(), params.to.as_deref())
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(state.orchestrator.get_central_bank_events(from, to)))
}

#[derive(Debug, Deserialize)]
pub struct CorrelationQuery {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    10
}

/// GET /correlations - top-K pairwise correlations by absolute strength
pub async fn get_correlations_handler(
    State(state): State<AppState>,
    Query(params): Query<CorrelationQuery>,
) -> Json<Vec<Correlation>> {
    let top: Vec<Correlation> = state
        .matrix
        .top_k(params.top)
        .into_iter()
        .cloned()
        .collect();
    Json(top)
}

/// GET /chains - named impact chains resolved against the matrix
pub async fn get_chains_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.matrix.render_chains())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub primary_configured: bool,
    pub secondary_configured: bool,
    pub generative_configured: bool,
    pub correlation_pairs: usize,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started.elapsed().as_secs(),
        primary_configured: state.integrations.primary_configured,
        secondary_configured: state.integrations.secondary_configured,
        generative_configured: state.integrations.generative_configured,
        correlation_pairs: state.matrix.len(),
    })
}
