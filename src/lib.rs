//! Disaster-risk scoring for climate readings.
//!
//! The [`scoring`] module is the core: a pure pipeline from time-ordered
//! readings to pattern summaries, per-hazard risk scores, confidence and
//! recommended actions. [`assessment`] and [`forecast`] build the two
//! dashboard views on top of it; the remaining modules wire the pipeline
//! into an HTTP service fed by a [`provider::ClimateDataProvider`].
//!
//! The seismic, ocean-current and historical-pattern inputs of the
//! assessment are placeholders drawn from a [`signals::SignalSource`].

pub mod assessment;
pub mod config;
pub mod forecast;
pub mod models;
pub mod monitor;
pub mod provider;
pub mod routes;
pub mod schema;
pub mod scoring;
pub mod signals;

pub use config::Config;

// Re-exported at the root so that routes/*.rs only depend on their parent
// gateway and the crate root, not on where each type lives.
pub use models::{DailyForecast, HazardRisk, OverallAssessment, PatternSummary, Reading};
pub use monitor::SharedHistory;
pub use provider::ClimateDataProvider;
