//! Climate data providers.
//!
//! A provider returns an immutable snapshot of the readings recorded over a
//! lookback window, ordered ascending by `recorded_at`. Handlers and the
//! monitor fetch a snapshot, then run the scoring pipeline on it; nothing
//! is cached or mutated in between.
//!
//! Implementations:
//! - [`PgProvider`]   – direct SQL against the `climate_readings` table
//! - [`RestProvider`] – PostgREST-style HTTP endpoint (hosted Supabase store)
//! - [`MemoryProvider`] – fixed in-memory snapshot for tests and demos
//!
//! [`DataSource`] dispatches between the first two based on configuration.

use std::future::Future;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::models::Reading;

/// Rows requested per page from the REST endpoint.
const REST_PAGE_SIZE: usize = 1000;

// ---

/// Source of time-ordered climate readings.
pub trait ClimateDataProvider: Send + Sync + 'static {
    /// Readings recorded in the last `days` days, oldest first.
    fn historical(&self, days: u32) -> impl Future<Output = Result<Vec<Reading>>> + Send;
}

/// Start of a lookback window ending now.
pub fn window_start(days: u32) -> DateTime<Utc> {
    // ---
    Utc::now() - Duration::days(i64::from(days))
}

// --- Postgres

/// Reads `climate_readings` through a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PgProvider {
    pool: PgPool,
}

impl PgProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ClimateDataProvider for PgProvider {
    fn historical(&self, days: u32) -> impl Future<Output = Result<Vec<Reading>>> + Send {
        // ---
        async move {
            let since = window_start(days);
            let readings = sqlx::query_as::<_, Reading>(
                r#"
                SELECT station_id, temperature, humidity, pressure, wind_speed, recorded_at
                FROM climate_readings
                WHERE recorded_at >= $1
                ORDER BY recorded_at ASC
                "#,
            )
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .context("querying climate_readings")?;

            debug!(days, rows = readings.len(), "fetched readings from postgres");
            Ok(readings)
        }
    }
}

// --- REST

/// Reads `climate_readings` from a PostgREST-compatible endpoint.
#[derive(Debug, Clone)]
pub struct RestProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    max_pages: u32,
}

impl RestProvider {
    // ---
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, max_pages: u32) -> Self {
        // ---
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            max_pages: max_pages.max(1),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/climate_readings", self.base_url)
    }

    async fn fetch_page(&self, since: &str, offset: usize) -> Result<Vec<Reading>> {
        // ---
        let url = self.table_url();
        tracing::debug!("Fetching readings from {} (offset {})", url, offset);

        let recorded_after = format!("gte.{since}");
        let limit = REST_PAGE_SIZE.to_string();
        let offset = offset.to_string();
        let params: [(&str, &str); 5] = [
            (
                "select",
                "station_id,temperature,humidity,pressure,wind_speed,recorded_at",
            ),
            ("recorded_at", recorded_after.as_str()),
            ("order", "recorded_at.asc"),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ];

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", url, status, body));
        }

        response
            .json::<Vec<Reading>>()
            .await
            .context("decoding climate_readings page")
    }
}

impl ClimateDataProvider for RestProvider {
    fn historical(&self, days: u32) -> impl Future<Output = Result<Vec<Reading>>> + Send {
        // ---
        async move {
            let since = window_start(days).to_rfc3339();
            let mut all = Vec::new();
            let mut page_count = 0;

            // The server may cap `limit` below the requested page size, so a
            // short page is not the end. Only an empty page is.
            loop {
                if page_count >= self.max_pages {
                    warn!(
                        "Hit page limit of {}, stopping pagination. Newer readings may be missing after {} records.",
                        self.max_pages,
                        all.len()
                    );
                    break;
                }
                page_count += 1;

                let page = self.fetch_page(&since, all.len()).await?;
                if page.is_empty() {
                    break;
                }
                all.extend(page);
            }

            all.sort_by_key(|r: &Reading| r.recorded_at);
            info!(
                "Finished fetching {} readings from {} pages",
                all.len(),
                page_count
            );
            Ok(all)
        }
    }
}

// --- dispatch

/// Provider selected by configuration.
#[derive(Debug, Clone)]
pub enum DataSource {
    Postgres(PgProvider),
    Rest(RestProvider),
}

impl ClimateDataProvider for DataSource {
    fn historical(&self, days: u32) -> impl Future<Output = Result<Vec<Reading>>> + Send {
        // ---
        async move {
            match self {
                DataSource::Postgres(provider) => provider.historical(days).await,
                DataSource::Rest(provider) => provider.historical(days).await,
            }
        }
    }
}

// --- in memory

/// Fixed snapshot of readings, filtered by the lookback window on each call.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    readings: Vec<Reading>,
}

impl MemoryProvider {
    // ---
    pub fn new(mut readings: Vec<Reading>) -> Self {
        // ---
        readings.sort_by_key(|r| r.recorded_at);
        Self { readings }
    }
}

impl ClimateDataProvider for MemoryProvider {
    fn historical(&self, days: u32) -> impl Future<Output = Result<Vec<Reading>>> + Send {
        // ---
        let since = window_start(days);
        let snapshot: Vec<Reading> = self
            .readings
            .iter()
            .filter(|r| r.recorded_at >= since)
            .cloned()
            .collect();
        async move { Ok(snapshot) }
    }
}
