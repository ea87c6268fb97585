//! Configuration loader for the `climate-risk` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate reads `env::var`.
//!
use std::{env, time::Duration};

use anyhow::{anyhow, Result};

use crate::forecast::{DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS};

/// `u32` from the environment, or `$default` when unset.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// String from the environment; errors when unset.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Where readings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    // ---
    /// Direct PostgreSQL access.
    Postgres {
        /// PostgreSQL connection string.
        db_url: String,
        /// Maximum number of database connections in the pool.
        pool_max: u32,
    },
    /// PostgREST-compatible HTTP endpoint.
    Rest {
        /// Base URL of the hosted store, e.g. `https://xyz.supabase.co`.
        api_url: String,
        /// API key sent as `apikey` and bearer token.
        api_key: String,
        /// Maximum number of pages to fetch (safety limit).
        max_pages: u32,
    },
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Reading source.
    pub source: SourceConfig,

    /// Days of readings analyzed per request.
    pub lookback_days: u32,

    /// Default number of forecast days.
    pub forecast_days: u32,

    /// Seconds between periodic assessments.
    pub refresh_secs: u32,

    /// TCP port the API listens on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Self {
            source: SourceConfig::Postgres {
                db_url: String::new(),
                pool_max: 5,
            },
            lookback_days: 15,
            forecast_days: DEFAULT_FORECAST_DAYS,
            refresh_secs: 300,
            port: 8080,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Source (one required; the HTTP source wins if both are set):
/// - `CLIMATE_API_URL` + `CLIMATE_API_KEY` – hosted REST store
/// - `DATABASE_URL` – PostgreSQL connection string
///
/// Optional:
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `API_MAX_PAGES` – max REST pages to fetch (default: 100)
/// - `LOOKBACK_DAYS` – analysis window in days (default: 15)
/// - `FORECAST_DAYS` – default forecast length (default: 7, max 14)
/// - `REFRESH_INTERVAL_SECS` – periodic assessment interval (default: 300)
/// - `PORT` – listen port (default: 8080)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let source = if env::var("CLIMATE_API_URL").is_ok() {
        SourceConfig::Rest {
            api_url: require_env!("CLIMATE_API_URL"),
            api_key: require_env!("CLIMATE_API_KEY"),
            max_pages: parse_env_u32!("API_MAX_PAGES", 100),
        }
    } else if env::var("DATABASE_URL").is_ok() {
        SourceConfig::Postgres {
            db_url: require_env!("DATABASE_URL"),
            pool_max: parse_env_u32!("DB_POOL_MAX", 5),
        }
    } else {
        return Err(anyhow!(
            "Either CLIMATE_API_URL or DATABASE_URL must be set in .env or environment"
        ));
    };

    let lookback_days = parse_env_u32!("LOOKBACK_DAYS", 15);
    let forecast_days = parse_env_u32!("FORECAST_DAYS", DEFAULT_FORECAST_DAYS);
    let refresh_secs = parse_env_u32!("REFRESH_INTERVAL_SECS", 300);
    let port = parse_env_u32!("PORT", 8080);

    if lookback_days == 0 {
        return Err(anyhow!("Invalid LOOKBACK_DAYS: must be at least 1"));
    }
    if forecast_days == 0 || forecast_days > MAX_FORECAST_DAYS {
        return Err(anyhow!(
            "Invalid FORECAST_DAYS: must be between 1 and {}",
            MAX_FORECAST_DAYS
        ));
    }
    if refresh_secs == 0 {
        return Err(anyhow!("Invalid REFRESH_INTERVAL_SECS: must be at least 1"));
    }
    let port = u16::try_from(port).map_err(|e| anyhow!("Invalid PORT: {}", e))?;

    Ok(Config {
        source,
        lookback_days,
        forecast_days,
        refresh_secs,
        port,
    })
}

impl Config {
    // ---
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_secs))
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password and the API key.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        match &self.source {
            SourceConfig::Postgres { db_url, pool_max } => {
                tracing::info!("  DATABASE_URL          : {}", mask_db_url(db_url));
                tracing::info!("  DB_POOL_MAX           : {}", pool_max);
            }
            SourceConfig::Rest {
                api_url,
                api_key,
                max_pages,
            } => {
                tracing::info!("  CLIMATE_API_URL       : {}", api_url);
                tracing::info!("  CLIMATE_API_KEY       : {}", mask_secret(api_key));
                tracing::info!("  API_MAX_PAGES         : {}", max_pages);
            }
        }
        tracing::info!("  LOOKBACK_DAYS         : {}", self.lookback_days);
        tracing::info!("  FORECAST_DAYS         : {}", self.forecast_days);
        tracing::info!("  REFRESH_INTERVAL_SECS : {}", self.refresh_secs);
        tracing::info!("  PORT                  : {}", self.port);
    }
}

/// Replace the password in a `user:password@host` connection string.
pub fn mask_db_url(db_url: &str) -> String {
    // ---
    if let Some(at_pos) = db_url.rfind('@') {
        if let Some(colon_pos) = db_url[..at_pos].rfind(':') {
            // `postgres://host` has its only colon in the scheme
            if !db_url[colon_pos..].starts_with("://") {
                return format!("{}:****{}", &db_url[..colon_pos], &db_url[at_pos..]);
            }
        }
    }
    db_url.to_string()
}

/// Keep the first four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    // ---
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
