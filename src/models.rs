//! Data models shared by the scoring pipeline, the providers and the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---

/// A single climate reading as supplied by the data provider.
///
/// Any measurement may be missing; the pipeline skips missing values
/// instead of treating them as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    // ---
    #[serde(default)]
    pub station_id: Option<Uuid>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl Reading {
    // ---
    /// Build a reading with all four measurements present.
    pub fn new(
        recorded_at: DateTime<Utc>,
        temperature: f64,
        humidity: f64,
        pressure: f64,
        wind_speed: f64,
    ) -> Self {
        // ---
        Self {
            station_id: None,
            temperature: Some(temperature),
            humidity: Some(humidity),
            pressure: Some(pressure),
            wind_speed: Some(wind_speed),
            recorded_at,
        }
    }
}

/// Direction of a variable over the two most recent sample windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
}

impl Trend {
    pub fn is_stable(self) -> bool {
        self == Trend::Stable
    }
}

/// Summary of trends, anomalies and volatility over a reading window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub temperature_trend: Trend,
    pub pressure_trend: Trend,
    pub humidity_trend: Trend,
    pub wind_trend: Trend,
    pub anomalies: u32,
    pub volatility: f64,
}

impl PatternSummary {
    // ---
    /// The four trend fields, in temperature, pressure, humidity, wind order.
    pub fn trends(&self) -> [Trend; 4] {
        [
            self.temperature_trend,
            self.pressure_trend,
            self.humidity_trend,
            self.wind_trend,
        ]
    }

    /// Number of trend fields that are not stable.
    pub fn active_trends(&self) -> usize {
        self.trends().iter().filter(|t| !t.is_stable()).count()
    }
}

/// The four scored event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    Tsunami,
    Earthquake,
    Cyclone,
    SevereWeather,
}

/// Per-hazard risk scores for one forecast day, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardRisk {
    pub tsunami_risk: f64,
    pub earthquake_risk: f64,
    pub cyclone_risk: f64,
    pub severe_weather_risk: f64,
    pub overall_risk: f64,
    pub confidence: f64,
}

impl HazardRisk {
    // ---
    /// Hazard scores paired with their category, in tie-break order.
    pub fn by_hazard(&self) -> [(Hazard, f64); 4] {
        [
            (Hazard::Tsunami, self.tsunami_risk),
            (Hazard::Earthquake, self.earthquake_risk),
            (Hazard::Cyclone, self.cyclone_risk),
            (Hazard::SevereWeather, self.severe_weather_risk),
        ]
    }
}

/// Status of a risk factor, derived from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Normal,
    Elevated,
    High,
    Critical,
}

impl FactorStatus {
    // ---
    pub fn from_value(value: f64) -> Self {
        // ---
        if value >= 80.0 {
            FactorStatus::Critical
        } else if value >= 60.0 {
            FactorStatus::High
        } else if value >= 40.0 {
            FactorStatus::Elevated
        } else {
            FactorStatus::Normal
        }
    }
}

/// One of the six weighted inputs of the overall assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub status: FactorStatus,
    pub description: String,
}

/// Level of the weighted overall assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    // ---
    pub fn from_score(score: f64) -> Self {
        // ---
        if score >= 75.0 {
            RiskLevel::Critical
        } else if score >= 55.0 {
            RiskLevel::High
        } else if score >= 35.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

/// Threat named in the overall assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threat {
    Tsunami,
    #[serde(rename = "Severe Weather")]
    SevereWeather,
    Earthquake,
    #[serde(rename = "Cyclone/Hurricane")]
    Cyclone,
    #[serde(rename = "General Weather")]
    GeneralWeather,
}

/// Result of the dashboard-wide weighted assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAssessment {
    pub level: RiskLevel,
    pub score: f64,
    pub confidence: f64,
    pub primary_threats: Vec<Threat>,
    pub timeframe: String,
    pub factors: Vec<RiskFactor>,
    pub assessed_at: DateTime<Utc>,
}

/// Forecast for one day of the weekly outlook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub day: u32,
    pub date: NaiveDate,
    pub risk: HazardRisk,
    pub primary_hazard: Hazard,
    pub recommendations: &'static [&'static str; 3],
    pub patterns: PatternSummary,
}
