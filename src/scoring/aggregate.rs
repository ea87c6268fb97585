//! The two aggregation policies.
//!
//! The weekly forecast takes the maximum of the four hazard risks. The
//! dashboard-wide assessment takes a weighted sum of six risk factors.
//! They use different inputs and are not interchangeable.

use super::hazards::clamp_score;
use crate::models::{Hazard, HazardRisk, RiskFactor, RiskLevel};

// ---

/// Hazard scores before aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardScores {
    pub tsunami: f64,
    pub earthquake: f64,
    pub cyclone: f64,
    pub severe_weather: f64,
}

/// Max-of-four policy used by the per-day forecast.
pub fn overall_risk(scores: &HazardScores) -> f64 {
    // ---
    let max = scores
        .tsunami
        .max(scores.earthquake)
        .max(scores.cyclone)
        .max(scores.severe_weather);
    clamp_score(max)
}

/// Weighted-sum policy used by the overall assessment.
pub fn weighted_score(factors: &[RiskFactor]) -> f64 {
    // ---
    let sum: f64 = factors.iter().map(|f| f.value * f.weight).sum();
    clamp_score(sum)
}

/// Weighted score and the level it maps to.
pub fn weighted_assessment(factors: &[RiskFactor]) -> (f64, RiskLevel) {
    // ---
    let score = weighted_score(factors);
    (score, RiskLevel::from_score(score))
}

/// Hazard with the highest risk; earlier hazards win ties.
pub fn primary_hazard(risk: &HazardRisk) -> Hazard {
    // ---
    let mut best = (Hazard::Tsunami, risk.tsunami_risk);
    for (hazard, value) in risk.by_hazard().into_iter().skip(1) {
        if value > best.1 {
            best = (hazard, value);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::FactorStatus;

    fn factor(value: f64, weight: f64) -> RiskFactor {
        // ---
        RiskFactor {
            name: "test".to_string(),
            value,
            weight,
            status: FactorStatus::from_value(value),
            description: String::new(),
        }
    }

    #[test]
    fn test_overall_is_max_of_four() {
        // ---
        let scores = HazardScores {
            tsunami: 12.0,
            earthquake: 64.0,
            cyclone: 30.0,
            severe_weather: 63.9,
        };
        assert_eq!(overall_risk(&scores), 64.0);
    }

    #[test]
    fn test_uniform_factors_score_their_value() {
        // ---
        let weights = [0.25, 0.20, 0.20, 0.15, 0.10, 0.10];
        let factors: Vec<RiskFactor> = weights.iter().map(|w| factor(20.0, *w)).collect();
        let (score, level) = weighted_assessment(&factors);

        assert!((score - 20.0).abs() < 1e-9);
        assert_eq!(level, RiskLevel::Low);
    }

    #[test]
    fn test_weighted_levels() {
        // ---
        let high = [factor(100.0, 0.6), factor(0.0, 0.4)];
        assert_eq!(weighted_assessment(&high).1, RiskLevel::High);

        let critical = [factor(100.0, 0.8), factor(50.0, 0.2)];
        assert_eq!(weighted_assessment(&critical).1, RiskLevel::Critical);
    }

    #[test]
    fn test_primary_hazard_tie_break() {
        // ---
        let risk = HazardRisk {
            tsunami_risk: 10.0,
            earthquake_risk: 40.0,
            cyclone_risk: 40.0,
            severe_weather_risk: 5.0,
            overall_risk: 40.0,
            confidence: 50.0,
        };
        assert_eq!(primary_hazard(&risk), Hazard::Earthquake);

        let all_zero = HazardRisk {
            tsunami_risk: 0.0,
            earthquake_risk: 0.0,
            cyclone_risk: 0.0,
            severe_weather_risk: 0.0,
            overall_risk: 0.0,
            confidence: 50.0,
        };
        assert_eq!(primary_hazard(&all_zero), Hazard::Tsunami);
    }
}
