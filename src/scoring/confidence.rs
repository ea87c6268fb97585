//! Confidence estimate for a forecast, from pattern strength.

use crate::models::PatternSummary;

pub const MIN_CONFIDENCE: f64 = 30.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

// ---

/// Confidence in `[30, 95]` for risks derived from `patterns`.
pub fn confidence(patterns: &PatternSummary) -> f64 {
    // ---
    let mut confidence = 50.0;
    confidence += (f64::from(patterns.anomalies) * 2.0).min(20.0);
    confidence += patterns.active_trends() as f64 * 5.0;

    // moderate volatility only
    if patterns.volatility > 0.1 && patterns.volatility < 0.5 {
        confidence += 15.0;
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
