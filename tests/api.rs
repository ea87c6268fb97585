use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use climate_risk::provider::MemoryProvider;
use climate_risk::routes::{router, AppState};
use climate_risk::{Config, Reading, SharedHistory};

// ---

/// Ten hourly readings ending now: calm first half, storm building after.
fn storm_readings() -> Vec<Reading> {
    // ---
    let now = Utc::now();
    (0..10)
        .map(|i| {
            let late = i >= 5;
            Reading::new(
                now - Duration::hours(10 - i),
                if late { 30.0 } else { 25.0 },
                if late { 90.0 } else { 70.0 },
                if late { 960.0 } else { 1012.0 },
                if late { 20.0 } else { 8.0 },
            )
        })
        .collect()
}

fn app(readings: Vec<Reading>) -> Router {
    // ---
    let state = AppState::new(
        Arc::new(MemoryProvider::new(readings)),
        Config::default(),
        SharedHistory::default(),
    );
    router(state)
}

async fn get_json(app: Router, uri: &str) -> Result<(StatusCode, Value)> {
    // ---
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    // ---
    let (status, body) = get_json(app(Vec::new()), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn patterns_reflect_readings() -> Result<()> {
    // ---
    let (status, body) = get_json(app(storm_readings()), "/api/patterns").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperatureTrend"], "rising");
    assert_eq!(body["pressureTrend"], "falling");
    assert_eq!(body["humidityTrend"], "rising");
    assert_eq!(body["windTrend"], "rising");
    assert_eq!(body["anomalies"], 0);
    Ok(())
}

#[tokio::test]
async fn patterns_for_empty_store_are_neutral() -> Result<()> {
    // ---
    let (status, body) = get_json(app(Vec::new()), "/api/patterns").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperatureTrend"], "stable");
    assert_eq!(body["volatility"], 0.0);
    Ok(())
}

#[tokio::test]
async fn forecast_defaults_to_a_week() -> Result<()> {
    // ---
    let (status, body) = get_json(app(storm_readings()), "/api/forecast").await?;

    assert_eq!(status, StatusCode::OK);
    let days = body.as_array().expect("forecast should be an array");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], 1);
    assert_eq!(days[0]["primaryHazard"], "cyclone");
    assert_eq!(days[0]["risk"]["cycloneRisk"], 100.0);
    assert_eq!(days[0]["recommendations"].as_array().map(Vec::len), Some(3));

    for day in days {
        let risk = &day["risk"];
        for key in ["tsunamiRisk", "earthquakeRisk", "cycloneRisk", "severeWeatherRisk", "overallRisk"] {
            let value = risk[key].as_f64().expect("risk should be numeric");
            assert!((0.0..=100.0).contains(&value), "{key} out of range: {value}");
        }
        let confidence = risk["confidence"].as_f64().expect("confidence should be numeric");
        assert!((30.0..=95.0).contains(&confidence));
    }
    Ok(())
}

#[tokio::test]
async fn forecast_honours_days_parameter() -> Result<()> {
    // ---
    let (_, body) = get_json(app(storm_readings()), "/api/forecast?days=3").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(3));

    let (_, body) = get_json(app(storm_readings()), "/api/forecast?days=100").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(14));
    Ok(())
}

#[tokio::test]
async fn assessment_is_recorded_in_history() -> Result<()> {
    // ---
    let app = app(storm_readings());

    let (status, assessment) = get_json(app.clone(), "/api/assessment").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assessment["factors"].as_array().map(Vec::len), Some(6));
    assert!(assessment["primaryThreats"].as_array().is_some_and(|t| !t.is_empty()));
    let score = assessment["score"].as_f64().expect("score should be numeric");
    assert!((0.0..=100.0).contains(&score));

    get_json(app.clone(), "/api/assessment").await?;

    let (status, history) = get_json(app, "/api/assessment/history").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn old_readings_fall_outside_the_window() -> Result<()> {
    // ---
    let stale: Vec<Reading> = storm_readings()
        .into_iter()
        .map(|mut r| {
            r.recorded_at -= Duration::days(30);
            r
        })
        .collect();

    let (_, body) = get_json(app(stale), "/api/patterns").await?;
    assert_eq!(body["pressureTrend"], "stable");
    Ok(())
}
