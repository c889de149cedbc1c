//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API in front of the sizing engine.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};

use crate::error::ApiError;
use crate::infrastructure::metrics::{
    Outcome, get_metrics_handle, record_evaluation, record_recomputation,
};
use crate::sizing::{
    DownstreamInputs, PositionSizingEngine, RawTradeInput, TradeInput, chart_slices,
    recompute_downstream,
};

use super::request::{EvaluateRequest, RecomputeRequest};
use super::response::{EvaluateResponse, HealthResponse, RecomputeResponse};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sizing engine.
    pub engine: Arc<PositionSizingEngine>,
    /// Form values a new calculator starts with.
    pub defaults: Arc<RawTradeInput>,
    /// Application version.
    pub version: String,
}

impl AppState {
    /// Create state for the router.
    #[must_use]
    pub fn new(
        engine: PositionSizingEngine,
        defaults: RawTradeInput,
        version: impl Into<String>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            defaults: Arc::new(defaults),
            version: version.into(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .route("/api/v1/defaults", get(get_defaults))
        .route("/api/v1/evaluate", post(evaluate))
        .route("/api/v1/recompute", post(recompute))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Prometheus metrics endpoint.
async fn render_metrics() -> Result<String, ApiError> {
    get_metrics_handle()
        .map(|handle| handle.render())
        .ok_or_else(ApiError::metrics_disabled)
}

/// Default form values endpoint.
async fn get_defaults(State(state): State<AppState>) -> Json<RawTradeInput> {
    Json(state.defaults.as_ref().clone())
}

/// Evaluate a trade.
async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_error)?;

    let started = Instant::now();
    let result = TradeInput::try_from(request.form).and_then(|input| {
        state
            .engine
            .evaluate(&input)
            .map(|metrics| (input.symbol_name, metrics))
    });

    match result {
        Ok((symbol_name, metrics)) => {
            record_evaluation(Outcome::Ok, started.elapsed());
            tracing::info!(
                symbol = %symbol_name,
                share_count = metrics.share_count,
                cost_of_trade = %metrics.cost_of_trade,
                "Trade evaluated"
            );

            Ok(Json(EvaluateResponse {
                symbol_name,
                formula_mode: state.engine.mode(),
                chart: chart_slices(&metrics),
                reward_to_risk: metrics.reward_to_risk(),
                metrics,
            }))
        }
        Err(e) => {
            record_evaluation(Outcome::Invalid, started.elapsed());
            tracing::warn!(field = e.field(), error = %e, "Trade evaluation rejected");
            Err(e.into())
        }
    }
}

/// Recompute share count and cost after upstream values changed.
async fn recompute(
    payload: Result<Json<RecomputeRequest>, JsonRejection>,
) -> Result<Json<RecomputeResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_error)?;
    let inputs = DownstreamInputs::from(request);

    match recompute_downstream(&inputs) {
        Ok(size) => {
            record_recomputation(Outcome::Ok);
            Ok(Json(RecomputeResponse {
                share_count: size.share_count,
                cost_of_trade: size.cost_of_trade,
            }))
        }
        Err(e) => {
            record_recomputation(Outcome::Invalid);
            tracing::warn!(field = e.field(), error = %e, "Recomputation rejected");
            Err(e.into())
        }
    }
}

/// Map a body extraction failure to an API error.
fn rejection_error(rejection: JsonRejection) -> ApiError {
    if rejection.status().is_server_error() {
        tracing::error!(error = %rejection.body_text(), "Failed to read request body");
        ApiError::internal(rejection.body_text())
    } else {
        ApiError::invalid_request(rejection.body_text())
    }
}
