//! Weekly hazard outlook built on the scoring pipeline.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::models::{DailyForecast, Reading};
use crate::scoring::{analyze_patterns, calculate_risk, primary_hazard, recommendations};

pub const DEFAULT_FORECAST_DAYS: u32 = 7;
pub const MAX_FORECAST_DAYS: u32 = 14;

// ---

/// Forecast days `1..=days` from one pattern analysis of `readings`.
///
/// `days` is clamped to `1..=MAX_FORECAST_DAYS`; each entry is dated
/// `today + day`.
pub fn weekly_forecast(readings: &[Reading], days: u32, today: NaiveDate) -> Vec<DailyForecast> {
    // ---
    let days = days.clamp(1, MAX_FORECAST_DAYS);
    let patterns = analyze_patterns(readings);

    let forecast: Vec<DailyForecast> = (1..=days)
        .map(|day| {
            let risk = calculate_risk(&patterns, day);
            DailyForecast {
                day,
                date: today
                    .checked_add_days(Days::new(u64::from(day)))
                    .unwrap_or(today),
                risk,
                primary_hazard: primary_hazard(&risk),
                recommendations: recommendations(risk.overall_risk),
                patterns,
            }
        })
        .collect();

    debug!(
        readings = readings.len(),
        days,
        peak = forecast.first().map(|f| f.risk.overall_risk),
        "built weekly forecast"
    );
    forecast
}
