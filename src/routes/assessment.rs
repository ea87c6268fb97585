//! Overall risk assessment endpoints.
//!
//! - `GET /api/assessment` – run a fresh assessment and record it
//! - `GET /api/assessment/history` – recorded assessments, newest first

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tracing::{error, info};

use super::{provider_error, AppState};
use crate::monitor::run_assessment;
use crate::ClimateDataProvider;

// ---

pub fn router<P: ClimateDataProvider>() -> Router<AppState<P>> {
    // ---
    Router::new()
        .route("/api/assessment", get(current::<P>))
        .route("/api/assessment/history", get(history::<P>))
}

async fn current<P: ClimateDataProvider>(State(state): State<AppState<P>>) -> impl IntoResponse {
    // ---
    let result = run_assessment(
        state.provider.as_ref(),
        state.config.lookback_days,
        &state.history,
    )
    .await;

    match result {
        Ok(assessment) => {
            info!(
                "GET /api/assessment - level {:?}, score {}",
                assessment.level, assessment.score
            );
            (StatusCode::OK, Json(assessment)).into_response()
        }
        Err(e) => {
            error!("Failed to run assessment: {:#}", e);
            provider_error().into_response()
        }
    }
}

async fn history<P: ClimateDataProvider>(State(state): State<AppState<P>>) -> impl IntoResponse {
    // ---
    let entries = state.history.read().await.to_vec();
    Json(entries)
}
