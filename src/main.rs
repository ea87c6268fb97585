//! Application entry point for the `climate-risk` service.
//!
//! This binary orchestrates the full startup sequence, including:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Connecting the configured data source (PostgreSQL pool or REST client)
//! - Creating the readings schema when reading from PostgreSQL
//! - Spawning the periodic assessment task
//! - Mounting all API routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `DATABASE_URL` or `CLIMATE_API_URL` (**one required**) – reading source
//! - `CLIMATE_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `CLIMATE_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See [`climate_risk::config`] for the full list.
use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

use climate_risk::config::{self, SourceConfig};
use climate_risk::monitor::refresh_loop;
use climate_risk::provider::{DataSource, PgProvider, RestProvider};
use climate_risk::routes::{self, AppState};
use climate_risk::{schema, SharedHistory};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let source = connect_source(&cfg.source).await?;
    let provider = Arc::new(source);
    let history = SharedHistory::default();

    tokio::spawn(refresh_loop(
        Arc::clone(&provider),
        cfg.lookback_days,
        Arc::clone(&history),
        cfg.refresh_interval(),
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));

    // Build app from routes gateway
    let app: Router = routes::router(AppState::new(provider, cfg, history));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the configured data source, preparing the schema for PostgreSQL.
async fn connect_source(source: &SourceConfig) -> Result<DataSource> {
    // ---
    match source {
        SourceConfig::Postgres { db_url, pool_max } => {
            tracing::info!(
                "Attempting to connect to database: {}",
                config::mask_db_url(db_url)
            );

            let pool = PgPoolOptions::new()
                .max_connections(*pool_max)
                .connect(db_url)
                .await
                .map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to connect to database '{}': {}",
                        config::mask_db_url(db_url),
                        e
                    )
                })?;

            tracing::info!("Successfully connected to database");
            schema::create_schema(&pool).await?;
            Ok(DataSource::Postgres(PgProvider::new(pool)))
        }
        SourceConfig::Rest {
            api_url,
            api_key,
            max_pages,
        } => {
            tracing::info!("Reading climate data from {}", api_url);
            Ok(DataSource::Rest(RestProvider::new(
                api_url.as_str(),
                api_key.as_str(),
                *max_pages,
            )))
        }
    }
}

// ---

/// Install the compact fmt subscriber.
///
/// `RUST_LOG` overrides `CLIMATE_LOG_LEVEL`. `CLIMATE_SPAN_EVENTS` accepts
/// `full` or `enter_exit` (close events otherwise), and `FORCE_COLOR`
/// overrides terminal detection.
fn init_tracing() {
    // ---
    let span_events = match env::var("CLIMATE_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = env::var("CLIMATE_LOG_LEVEL")
            .ok()
            .filter(|l| matches!(l.as_str(), "trace" | "debug" | "info" | "warn" | "error"))
            .unwrap_or_else(|| "debug".to_string());
        EnvFilter::new(format!("{level},sqlx::query=warn,hyper=info,reqwest=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
