//! Recommended actions by overall-risk band.

pub const CRITICAL_ACTIONS: [&str; 3] = [
    "Immediate evacuation planning required",
    "Emergency services on high alert",
    "Public warning systems activated",
];

pub const ELEVATED_ACTIONS: [&str; 3] = [
    "Enhanced monitoring protocols",
    "Prepare emergency response teams",
    "Issue weather advisories",
];

pub const WATCH_ACTIONS: [&str; 3] = [
    "Continue surveillance",
    "Review emergency procedures",
    "Monitor weather updates closely",
];

pub const ROUTINE_ACTIONS: [&str; 3] = [
    "Maintain routine monitoring",
    "Standard precautionary measures",
    "Regular system maintenance",
];

// ---

/// Fixed list of three actions for an overall risk.
pub fn recommendations(overall_risk: f64) -> &'static [&'static str; 3] {
    // ---
    if overall_risk > 70.0 {
        &CRITICAL_ACTIONS
    } else if overall_risk > 50.0 {
        &ELEVATED_ACTIONS
    } else if overall_risk > 30.0 {
        &WATCH_ACTIONS
    } else {
        &ROUTINE_ACTIONS
    }
}
