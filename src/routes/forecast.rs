//! Pattern summary and weekly forecast endpoints.
//!
//! - `GET /api/patterns` – pattern summary over the lookback window
//! - `GET /api/forecast?days=N` – per-day hazard forecast

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};

use super::{provider_error, AppState};
use crate::forecast::weekly_forecast;
use crate::scoring::analyze_patterns;
use crate::ClimateDataProvider;

// ---

pub fn router<P: ClimateDataProvider>() -> Router<AppState<P>> {
    // ---
    Router::new()
        .route("/api/patterns", get(patterns::<P>))
        .route("/api/forecast", get(forecast::<P>))
}

/// Query parameters for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    days: Option<u32>,
}

async fn patterns<P: ClimateDataProvider>(State(state): State<AppState<P>>) -> impl IntoResponse {
    // ---
    let days = state.config.lookback_days;
    match state.provider.historical(days).await {
        Ok(readings) => {
            let summary = analyze_patterns(&readings);
            info!(readings = readings.len(), "GET /api/patterns");
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => {
            error!("Failed to fetch readings for patterns: {:#}", e);
            provider_error().into_response()
        }
    }
}

async fn forecast<P: ClimateDataProvider>(
    Query(params): Query<ForecastQuery>,
    State(state): State<AppState<P>>,
) -> impl IntoResponse {
    // ---
    let days = params.days.unwrap_or(state.config.forecast_days);
    info!("GET /api/forecast - {} days", days);

    let readings = match state.provider.historical(state.config.lookback_days).await {
        Ok(readings) => readings,
        Err(e) => {
            error!("Failed to fetch readings for forecast: {:#}", e);
            return provider_error().into_response();
        }
    };

    let forecast = weekly_forecast(&readings, days, Utc::now().date_naive());
    (StatusCode::OK, Json(forecast)).into_response()
}
