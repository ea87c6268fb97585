//! Per-hazard risk functions.
//!
//! Each function sums its pattern contributions, scales the sum by a linear
//! day-offset decay and clamps the result to `[0, 100]`. The decay can go
//! negative for distant offsets; the final clamp absorbs it.

use crate::models::{PatternSummary, Trend};

/// Per-day decay slopes.
const TSUNAMI_DECAY: f64 = 0.10;
const EARTHQUAKE_DECAY: f64 = 0.08;
const CYCLONE_DECAY: f64 = 0.12;
const SEVERE_WEATHER_DECAY: f64 = 0.15;

// ---

/// Linear decay multiplier for a forecast day; day 1 is undiscounted.
pub fn decay_factor(day_offset: u32, slope: f64) -> f64 {
    // ---
    let day = day_offset.max(1);
    1.0 - f64::from(day - 1) * slope
}

/// Clamp a score into `[0, 100]`, mapping NaN to zero.
pub fn clamp_score(value: f64) -> f64 {
    // ---
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn tsunami_risk(patterns: &PatternSummary, day_offset: u32) -> f64 {
    // ---
    let mut risk = 0.0;
    if patterns.pressure_trend == Trend::Falling {
        risk += 30.0;
    }
    if patterns.temperature_trend == Trend::Rising {
        risk += 20.0;
    }
    risk += patterns.volatility * 20.0;
    risk += (f64::from(patterns.anomalies) * 5.0).min(25.0);

    clamp_score(risk * decay_factor(day_offset, TSUNAMI_DECAY))
}

pub fn earthquake_risk(patterns: &PatternSummary, day_offset: u32) -> f64 {
    // ---
    let mut risk = 0.0;
    if !patterns.pressure_trend.is_stable() {
        risk += 25.0;
    }
    if !patterns.temperature_trend.is_stable() {
        risk += 15.0;
    }
    risk += (f64::from(patterns.anomalies) * 8.0).min(40.0);
    risk += patterns.volatility * 15.0;

    clamp_score(risk * decay_factor(day_offset, EARTHQUAKE_DECAY))
}

pub fn cyclone_risk(patterns: &PatternSummary, day_offset: u32) -> f64 {
    // ---
    let mut risk = 0.0;
    if patterns.temperature_trend == Trend::Rising {
        risk += 35.0;
    }
    if patterns.pressure_trend == Trend::Falling {
        risk += 30.0;
    }
    if patterns.humidity_trend == Trend::Rising {
        risk += 20.0;
    }
    if !patterns.wind_trend.is_stable() {
        risk += 15.0;
    }

    clamp_score(risk * decay_factor(day_offset, CYCLONE_DECAY))
}

pub fn severe_weather_risk(patterns: &PatternSummary, day_offset: u32) -> f64 {
    // ---
    let mut risk = 0.0;
    if !patterns.temperature_trend.is_stable() {
        risk += 20.0;
    }
    if !patterns.pressure_trend.is_stable() {
        risk += 25.0;
    }
    if !patterns.humidity_trend.is_stable() {
        risk += 15.0;
    }
    if !patterns.wind_trend.is_stable() {
        risk += 20.0;
    }
    risk += patterns.volatility * 25.0;

    clamp_score(risk * decay_factor(day_offset, SEVERE_WEATHER_DECAY))
}
