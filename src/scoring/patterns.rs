//! Pattern analysis: trend direction per variable, anomaly count and
//! volatility over a window of readings.

use tracing::trace;

use super::stats::{count_outliers, mean, present, std_dev, trend_windows};
use crate::models::{PatternSummary, Reading, Trend};

/// Relative change, in percent, between the two windows that counts as a trend.
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Number of monitored variables the volatility is averaged over.
const VARIABLE_COUNT: f64 = 4.0;

// ---

/// Summarize a time-ordered window of readings.
///
/// Returns the neutral summary (all stable, no anomalies, zero volatility)
/// for an empty window.
pub fn analyze_patterns(readings: &[Reading]) -> PatternSummary {
    // ---
    if readings.is_empty() {
        return PatternSummary::default();
    }

    let series = variable_series(readings);
    let [temperature, pressure, humidity, wind] = &series;

    let summary = PatternSummary {
        temperature_trend: trend(temperature),
        pressure_trend: trend(pressure),
        humidity_trend: trend(humidity),
        wind_trend: trend(wind),
        anomalies: series.iter().map(|values| count_outliers(values)).sum(),
        volatility: volatility(&series),
    };

    trace!(readings = readings.len(), ?summary, "analyzed patterns");
    summary
}

/// Trend of one variable from its last two five-sample windows.
///
/// Stable when there are fewer than two samples, no older window, or an
/// older window averaging zero.
pub fn trend(values: &[f64]) -> Trend {
    // ---
    if values.len() < 2 {
        return Trend::Stable;
    }
    let (older, recent) = trend_windows(values);
    let (Some(older_avg), Some(recent_avg)) = (mean(older), mean(recent)) else {
        return Trend::Stable;
    };
    if older_avg == 0.0 {
        return Trend::Stable;
    }

    let change = (recent_avg - older_avg) / older_avg * 100.0;
    if change > TREND_THRESHOLD_PCT {
        Trend::Rising
    } else if change < -TREND_THRESHOLD_PCT {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Mean coefficient of variation across the four variables.
///
/// Variables with fewer than two samples, a zero mean or a non-finite
/// coefficient contribute nothing, but the divisor stays at four.
pub fn volatility(series: &[Vec<f64>; 4]) -> f64 {
    // ---
    let total: f64 = series
        .iter()
        .filter(|values| values.len() >= 2)
        .filter_map(|values| {
            let m = mean(values)?;
            if m == 0.0 {
                return None;
            }
            let cv = std_dev(values, m) / m.abs();
            cv.is_finite().then_some(cv)
        })
        .sum();

    total / VARIABLE_COUNT
}

/// Present values for temperature, pressure, humidity and wind speed.
pub(crate) fn variable_series(readings: &[Reading]) -> [Vec<f64>; 4] {
    // ---
    [
        present(readings, |r| r.temperature),
        present(readings, |r| r.pressure),
        present(readings, |r| r.humidity),
        present(readings, |r| r.wind_speed),
    ]
}
