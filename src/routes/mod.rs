//! API route gateway.
//!
//! Each sibling module exports a subrouter; this gateway merges them and
//! attaches the shared [`AppState`]. `main.rs` only sees [`router`].

use std::sync::Arc;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;

use crate::{ClimateDataProvider, Config, SharedHistory};

mod assessment;
mod forecast;
mod health;

// ---

/// State shared by all handlers.
pub struct AppState<P> {
    pub provider: Arc<P>,
    pub config: Config,
    pub history: SharedHistory,
}

impl<P> AppState<P> {
    pub fn new(provider: Arc<P>, config: Config, history: SharedHistory) -> Self {
        Self {
            provider,
            config,
            history,
        }
    }
}

// Manual impl: `P` itself need not be `Clone` behind the `Arc`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
            history: Arc::clone(&self.history),
        }
    }
}

pub fn router<P: ClimateDataProvider>(state: AppState<P>) -> Router {
    // ---
    Router::new()
        .merge(forecast::router())
        .merge(assessment::router())
        .merge(health::router())
        .with_state(state)
}

/// JSON error body returned when the data provider fails.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

fn provider_error() -> (StatusCode, Json<ErrorResponse>) {
    // ---
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: "Failed to fetch climate readings",
        }),
    )
}
