//! Dashboard-wide risk assessment over six weighted factors.
//!
//! Unlike the weekly forecast, which takes the worst of four hazard scores,
//! this view combines six independent factor scores with fixed weights (see
//! [`FactorKind::weight`]). Three of the six factors are only partly
//! derived from readings; their remaining inputs come from a
//! [`SignalSource`] and are placeholders.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{FactorStatus, OverallAssessment, Reading, RiskFactor, RiskLevel, Threat};
use crate::scoring::stats::{count_outliers, mean, present, trend_windows};
use crate::scoring::{clamp_score, weighted_assessment, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::signals::SignalSource;

/// Sea surface temperature treated as normal, in °C.
const NORMAL_SEA_TEMP_C: f64 = 26.0;

/// Samples between the two pressure readings compared for the change rate.
const PRESSURE_LOOKBACK: usize = 6;

// ---

/// The six factors of the overall assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    Pressure,
    Temperature,
    Seismic,
    Ocean,
    Wind,
    HistoricalPattern,
}

impl FactorKind {
    // ---
    pub const ALL: [FactorKind; 6] = [
        FactorKind::Pressure,
        FactorKind::Temperature,
        FactorKind::Seismic,
        FactorKind::Ocean,
        FactorKind::Wind,
        FactorKind::HistoricalPattern,
    ];

    /// Weights sum to 1.0 across [`FactorKind::ALL`].
    pub fn weight(self) -> f64 {
        match self {
            FactorKind::Pressure => 0.25,
            FactorKind::Temperature => 0.20,
            FactorKind::Seismic => 0.20,
            FactorKind::Ocean => 0.15,
            FactorKind::Wind => 0.10,
            FactorKind::HistoricalPattern => 0.10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FactorKind::Pressure => "Atmospheric Pressure",
            FactorKind::Temperature => "Temperature Anomalies",
            FactorKind::Seismic => "Seismic Indicators",
            FactorKind::Ocean => "Ocean Conditions",
            FactorKind::Wind => "Wind Patterns",
            FactorKind::HistoricalPattern => "Historical Patterns",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FactorKind::Pressure => {
                "Rapid pressure changes indicate potential severe weather or tsunami risk"
            }
            FactorKind::Temperature => {
                "Unusual temperature patterns can trigger various disaster scenarios"
            }
            FactorKind::Seismic => "Ground movement and tectonic activity monitoring",
            FactorKind::Ocean => "Sea surface temperature and current anomalies",
            FactorKind::Wind => "Atmospheric circulation and wind shear analysis",
            FactorKind::HistoricalPattern => "Comparison with past disaster precursor patterns",
        }
    }

    /// Score this factor, clamped to `[0, 100]`.
    pub fn score(self, readings: &[Reading], signals: &mut impl SignalSource) -> f64 {
        // ---
        let value = match self {
            FactorKind::Pressure => pressure_risk(readings),
            FactorKind::Temperature => temperature_risk(readings),
            FactorKind::Seismic => seismic_risk(signals),
            FactorKind::Ocean => ocean_risk(readings, signals),
            FactorKind::Wind => wind_risk(readings),
            FactorKind::HistoricalPattern => historical_risk(signals),
        };
        clamp_score(value)
    }

    /// Build the scored [`RiskFactor`] record.
    pub fn evaluate(self, readings: &[Reading], signals: &mut impl SignalSource) -> RiskFactor {
        // ---
        let value = self.score(readings, signals);
        RiskFactor {
            name: self.name().to_string(),
            value,
            weight: self.weight(),
            status: FactorStatus::from_value(value),
            description: self.description().to_string(),
        }
    }
}

/// Run the full weighted assessment over a reading window.
pub fn assess(
    readings: &[Reading],
    signals: &mut impl SignalSource,
    now: DateTime<Utc>,
) -> OverallAssessment {
    // ---
    let factors: Vec<RiskFactor> = FactorKind::ALL
        .iter()
        .map(|kind| kind.evaluate(readings, signals))
        .collect();

    let (score, level) = weighted_assessment(&factors);
    let confidence = assessment_confidence(&factors, readings.len());
    let primary_threats = primary_threats(&factors);
    let timeframe = timeframe(level, &factors).to_string();

    debug!(
        readings = readings.len(),
        score,
        ?level,
        confidence,
        "computed overall assessment"
    );

    OverallAssessment {
        level,
        score: score.round(),
        confidence: confidence.round(),
        primary_threats,
        timeframe,
        factors,
        assessed_at: now,
    }
}

// --- factor scores

/// Pressure change rate over the last six samples plus absolute level.
pub fn pressure_risk(readings: &[Reading]) -> f64 {
    // ---
    let pressures = present(readings, |r| r.pressure);
    let Some(&latest) = pressures.last() else {
        return 20.0;
    };
    let previous = pressures[pressures.len().saturating_sub(PRESSURE_LOOKBACK)];
    let change_rate = (latest - previous) / PRESSURE_LOOKBACK as f64;

    let mut risk: f64 = 0.0;
    if change_rate < -8.0 {
        risk += 70.0;
    } else if change_rate < -5.0 {
        risk += 50.0;
    } else if change_rate < -3.0 {
        risk += 30.0;
    }

    if latest < 970.0 {
        risk += 60.0;
    } else if latest < 980.0 {
        risk += 40.0;
    } else if latest > 1040.0 {
        risk += 30.0;
    }

    risk.min(100.0)
}

/// Share of temperature outliers plus the recent window shift.
pub fn temperature_risk(readings: &[Reading]) -> f64 {
    // ---
    let temperatures = present(readings, |r| r.temperature);
    if temperatures.is_empty() {
        return 15.0;
    }

    let anomaly_rate = f64::from(count_outliers(&temperatures)) / temperatures.len() as f64;
    let mut risk = anomaly_rate * 80.0;

    let (older, recent) = trend_windows(&temperatures);
    if let (Some(older_avg), Some(recent_avg)) = (mean(older), mean(recent)) {
        let change = (recent_avg - older_avg).abs();
        if change > 5.0 {
            risk += 25.0;
        } else if change > 3.0 {
            risk += 15.0;
        }
    }

    risk.min(100.0)
}

/// Placeholder: no seismic feed exists.
pub fn seismic_risk(signals: &mut impl SignalSource) -> f64 {
    // ---
    let base = signals.sample(40.0);
    let recent_activity = signals.sample(30.0);
    let tectonic_stress = signals.sample(30.0);
    (base + recent_activity + tectonic_stress).min(100.0)
}

/// Sea-temperature anomaly; the current/salinity term is a placeholder.
pub fn ocean_risk(readings: &[Reading], signals: &mut impl SignalSource) -> f64 {
    // ---
    let temperatures = present(readings, |r| r.temperature);
    let Some(avg) = mean(&temperatures) else {
        return 10.0;
    };

    let anomaly = (avg - NORMAL_SEA_TEMP_C).abs();
    let mut risk = if anomaly > 3.0 {
        40.0
    } else if anomaly > 2.0 {
        25.0
    } else if anomaly > 1.0 {
        15.0
    } else {
        0.0
    };
    risk += signals.sample(20.0);

    risk.min(100.0)
}

/// Peak wind speed plus the spread between the calmest and windiest sample.
pub fn wind_risk(readings: &[Reading]) -> f64 {
    // ---
    let speeds = present(readings, |r| r.wind_speed);
    if speeds.is_empty() {
        return 10.0;
    }
    let max = speeds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = speeds.iter().copied().fold(f64::INFINITY, f64::min);

    let mut risk: f64 = 0.0;
    if max > 25.0 {
        risk += 40.0;
    } else if max > 20.0 {
        risk += 25.0;
    } else if max > 15.0 {
        risk += 15.0;
    }

    let variability = max - min;
    if variability > 15.0 {
        risk += 20.0;
    } else if variability > 10.0 {
        risk += 10.0;
    }

    risk.min(100.0)
}

/// Placeholder: no historical event catalogue exists.
pub fn historical_risk(signals: &mut impl SignalSource) -> f64 {
    // ---
    let seasonal = signals.sample(30.0);
    let cyclical = signals.sample(25.0);
    let recent_events = signals.sample(20.0);
    (seasonal + cyclical + recent_events).min(100.0)
}

// --- summary fields

/// Confidence in the weighted assessment, in `[30, 95]`.
pub fn assessment_confidence(factors: &[RiskFactor], reading_count: usize) -> f64 {
    // ---
    let mut confidence = 50.0;
    if reading_count > 50 {
        confidence += 20.0;
    } else if reading_count > 20 {
        confidence += 10.0;
    }

    let high = factors.iter().filter(|f| f.value > 50.0).count();
    if high > 2 {
        confidence += 15.0;
    }

    // extreme values are more likely sensor faults
    let extreme = factors.iter().filter(|f| f.value > 90.0).count();
    confidence -= extreme as f64 * 5.0;

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Threats suggested by the factor scores, most specific first.
pub fn primary_threats(factors: &[RiskFactor]) -> Vec<Threat> {
    // ---
    let value_of = |kind: FactorKind| {
        factors
            .iter()
            .find(|f| f.name == kind.name())
            .map(|f| f.value)
    };

    let mut threats = Vec::new();
    if let Some(pressure) = value_of(FactorKind::Pressure).filter(|v| *v > 50.0) {
        if pressure > 70.0 {
            threats.push(Threat::Tsunami);
        }
        threats.push(Threat::SevereWeather);
    }
    if value_of(FactorKind::Seismic).is_some_and(|v| v > 50.0) {
        threats.push(Threat::Earthquake);
    }
    let ocean_high = value_of(FactorKind::Ocean).is_some_and(|v| v > 50.0);
    let wind_high = value_of(FactorKind::Wind).is_some_and(|v| v > 40.0);
    if ocean_high && wind_high {
        threats.push(Threat::Cyclone);
    }

    if threats.is_empty() {
        threats.push(Threat::GeneralWeather);
    }
    threats
}

/// Expected time to impact for an assessment level.
pub fn timeframe(level: RiskLevel, factors: &[RiskFactor]) -> &'static str {
    // ---
    match level {
        RiskLevel::Critical => {
            let max = factors.iter().map(|f| f.value).fold(0.0, f64::max);
            if max > 90.0 {
                "6-24 hours"
            } else {
                "1-3 days"
            }
        }
        RiskLevel::High => "2-7 days",
        RiskLevel::Moderate => "1-2 weeks",
        RiskLevel::Low => "2+ weeks",
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::signals::FixedSignals;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
    }

    fn readings_from(pressures: &[f64], temperature: f64, wind: f64) -> Vec<Reading> {
        // ---
        pressures
            .iter()
            .enumerate()
            .map(|(i, p)| Reading::new(start() + Duration::hours(i as i64), temperature, 70.0, *p, wind))
            .collect()
    }

    fn factor(kind: FactorKind, value: f64) -> RiskFactor {
        // ---
        RiskFactor {
            name: kind.name().to_string(),
            value,
            weight: kind.weight(),
            status: FactorStatus::from_value(value),
            description: kind.description().to_string(),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        // ---
        let total: f64 = FactorKind::ALL.iter().map(|k| k.weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_readings_use_defaults() {
        // ---
        assert_eq!(pressure_risk(&[]), 20.0);
        assert_eq!(temperature_risk(&[]), 15.0);
        assert_eq!(ocean_risk(&[], &mut FixedSignals::zero()), 10.0);
        assert_eq!(wind_risk(&[]), 10.0);
    }

    #[test]
    fn test_pressure_drop_and_low_level() {
        // ---
        // 1010 -> 960 across six samples: -8.33 hPa/h and below 970
        let readings = readings_from(&[1010.0, 1000.0, 990.0, 980.0, 970.0, 960.0], 26.0, 5.0);
        assert_eq!(pressure_risk(&readings), 100.0);

        let steady = readings_from(&[1012.0; 8], 26.0, 5.0);
        assert_eq!(pressure_risk(&steady), 0.0);

        let high = readings_from(&[1045.0; 3], 26.0, 5.0);
        assert_eq!(pressure_risk(&high), 30.0);
    }

    #[test]
    fn test_temperature_window_shift() {
        // ---
        let mut readings = readings_from(&[1010.0; 10], 20.0, 5.0);
        for reading in readings.iter_mut().skip(5) {
            reading.temperature = Some(24.0);
        }
        // no outliers; 4 degree shift between windows
        assert_eq!(temperature_risk(&readings), 15.0);
    }

    #[test]
    fn test_ocean_and_wind() {
        // ---
        let warm = readings_from(&[1010.0; 4], 30.0, 5.0);
        assert_eq!(ocean_risk(&warm, &mut FixedSignals::zero()), 40.0);
        assert_eq!(ocean_risk(&warm, &mut FixedSignals::new(0.5)), 50.0);

        let mut gusty = readings_from(&[1010.0; 4], 26.0, 5.0);
        gusty[2].wind_speed = Some(27.0);
        // peak above 25 and spread of 22
        assert_eq!(wind_risk(&gusty), 60.0);
    }

    #[test]
    fn test_placeholder_factors_follow_signals() {
        // ---
        assert_eq!(seismic_risk(&mut FixedSignals::zero()), 0.0);
        assert_eq!(seismic_risk(&mut FixedSignals::new(0.5)), 50.0);
        assert_eq!(historical_risk(&mut FixedSignals::new(0.5)), 37.5);
    }

    #[test]
    fn test_assess_calm_conditions() {
        // ---
        let readings = readings_from(&[1012.0; 30], 26.0, 5.0);
        let now = start() + Duration::days(2);
        let assessment = assess(&readings, &mut FixedSignals::zero(), now);

        assert_eq!(assessment.factors.len(), 6);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.score, 0.0);
        // 50 + 10 for more than twenty readings
        assert_eq!(assessment.confidence, 60.0);
        assert_eq!(assessment.primary_threats, vec![Threat::GeneralWeather]);
        assert_eq!(assessment.timeframe, "2+ weeks");
        assert_eq!(assessment.assessed_at, now);
        assert!(assessment
            .factors
            .iter()
            .all(|f| f.status == FactorStatus::Normal));
    }

    #[test]
    fn test_assess_is_deterministic_with_fixed_signals() {
        // ---
        let readings = readings_from(&[1010.0, 1000.0, 990.0, 980.0, 970.0, 960.0], 31.0, 30.0);
        let a = assess(&readings, &mut FixedSignals::new(0.3), start());
        let b = assess(&readings, &mut FixedSignals::new(0.3), start());
        assert_eq!(a, b);
    }

    #[test]
    fn test_primary_threats() {
        // ---
        let factors = vec![
            factor(FactorKind::Pressure, 75.0),
            factor(FactorKind::Seismic, 55.0),
            factor(FactorKind::Ocean, 60.0),
            factor(FactorKind::Wind, 45.0),
        ];
        assert_eq!(
            primary_threats(&factors),
            vec![
                Threat::Tsunami,
                Threat::SevereWeather,
                Threat::Earthquake,
                Threat::Cyclone
            ]
        );

        let factors = vec![factor(FactorKind::Pressure, 60.0), factor(FactorKind::Ocean, 80.0)];
        assert_eq!(primary_threats(&factors), vec![Threat::SevereWeather]);
    }

    #[test]
    fn test_assessment_confidence() {
        // ---
        let factors: Vec<RiskFactor> = FactorKind::ALL.iter().map(|k| factor(*k, 95.0)).collect();
        // 50 + 20 + 15 - 30
        assert_eq!(assessment_confidence(&factors, 60), 55.0);

        let calm: Vec<RiskFactor> = FactorKind::ALL.iter().map(|k| factor(*k, 10.0)).collect();
        assert_eq!(assessment_confidence(&calm, 0), 50.0);
    }

    #[test]
    fn test_timeframe() {
        // ---
        let extreme = vec![factor(FactorKind::Pressure, 95.0)];
        let strong = vec![factor(FactorKind::Pressure, 85.0)];
        assert_eq!(timeframe(RiskLevel::Critical, &extreme), "6-24 hours");
        assert_eq!(timeframe(RiskLevel::Critical, &strong), "1-3 days");
        assert_eq!(timeframe(RiskLevel::High, &strong), "2-7 days");
        assert_eq!(timeframe(RiskLevel::Moderate, &strong), "1-2 weeks");
        assert_eq!(timeframe(RiskLevel::Low, &strong), "2+ weeks");
    }
}
