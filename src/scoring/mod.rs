//! Trend, anomaly and risk-scoring pipeline.
//!
//! Every function in this module is a pure function of its arguments:
//! readings go in, freshly allocated summaries and scores come out, and no
//! state is kept between calls. The pipeline is total over its input
//! domain; empty or all-missing input yields neutral defaults instead of
//! errors.
//!
//! readings → [`analyze_patterns`] → hazard functions (per day offset)
//! → [`overall_risk`] → [`confidence`] → [`recommendations`]

mod aggregate;
mod confidence;
mod hazards;
mod patterns;
mod recommendations;
pub(crate) mod stats;

pub use aggregate::{
    overall_risk, primary_hazard, weighted_assessment, weighted_score, HazardScores,
};
pub use confidence::{confidence, MAX_CONFIDENCE, MIN_CONFIDENCE};
pub use hazards::{
    clamp_score, cyclone_risk, decay_factor, earthquake_risk, severe_weather_risk, tsunami_risk,
};
pub use patterns::{analyze_patterns, trend, volatility};
pub use recommendations::recommendations;

use crate::models::{HazardRisk, PatternSummary};

// ---

/// Score all four hazards for one forecast day and aggregate them.
pub fn calculate_risk(patterns: &PatternSummary, day_offset: u32) -> HazardRisk {
    // ---
    let scores = HazardScores {
        tsunami: tsunami_risk(patterns, day_offset),
        earthquake: earthquake_risk(patterns, day_offset),
        cyclone: cyclone_risk(patterns, day_offset),
        severe_weather: severe_weather_risk(patterns, day_offset),
    };

    HazardRisk {
        tsunami_risk: scores.tsunami,
        earthquake_risk: scores.earthquake,
        cyclone_risk: scores.cyclone,
        severe_weather_risk: scores.severe_weather,
        overall_risk: overall_risk(&scores),
        confidence: confidence(patterns),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::Trend;

    #[test]
    fn test_calculate_risk_aggregates_hazards() {
        // ---
        let patterns = PatternSummary {
            temperature_trend: Trend::Rising,
            pressure_trend: Trend::Falling,
            humidity_trend: Trend::Stable,
            wind_trend: Trend::Stable,
            anomalies: 2,
            volatility: 0.05,
        };
        let risk = calculate_risk(&patterns, 1);

        // cyclone: 35 + 30
        assert!((risk.cyclone_risk - 65.0).abs() < 1e-9);
        assert_eq!(risk.overall_risk, risk.tsunami_risk.max(risk.cyclone_risk));
        // 50 + 4 + 10
        assert_eq!(risk.confidence, 64.0);
        assert_eq!(recommendations(risk.overall_risk), &recommendations::ELEVATED_ACTIONS);
    }

    #[test]
    fn test_neutral_summary_is_routine() {
        // ---
        let risk = calculate_risk(&PatternSummary::default(), 4);
        assert_eq!(risk.overall_risk, 0.0);
        assert_eq!(risk.confidence, 50.0);
    }
}
