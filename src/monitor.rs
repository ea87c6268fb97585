//! Periodic re-assessment and the bounded assessment history.
//!
//! The scoring pipeline keeps no state. The history below belongs to the
//! service: each assessment, whether triggered by the refresh loop or by a
//! request, is pushed here so the API can show recent results.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::assessment::assess;
use crate::models::OverallAssessment;
use crate::provider::ClimateDataProvider;
use crate::signals::RandomSignals;

/// Number of assessments kept.
pub const HISTORY_CAPACITY: usize = 10;

// ---

/// Most recent assessments, newest first.
#[derive(Debug, Clone, Default)]
pub struct AssessmentHistory {
    entries: VecDeque<OverallAssessment>,
}

impl AssessmentHistory {
    // ---
    pub fn push(&mut self, assessment: OverallAssessment) {
        // ---
        self.entries.push_front(assessment);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn latest(&self) -> Option<&OverallAssessment> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<OverallAssessment> {
        self.entries.iter().cloned().collect()
    }
}

pub type SharedHistory = Arc<RwLock<AssessmentHistory>>;

/// Fetch a snapshot, assess it and record the result.
pub async fn run_assessment<P: ClimateDataProvider>(
    provider: &P,
    lookback_days: u32,
    history: &SharedHistory,
) -> anyhow::Result<OverallAssessment> {
    // ---
    let readings = provider.historical(lookback_days).await?;
    let assessment = assess(&readings, &mut RandomSignals::new(), Utc::now());
    history.write().await.push(assessment.clone());
    Ok(assessment)
}

/// Ticker for the refresh loop. A slow refresh pushes the next tick back
/// instead of firing the missed ones back to back.
fn refresh_ticker(period: Duration) -> Interval {
    // ---
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Re-run the assessment every `period` until the task is dropped.
///
/// A failed refresh is logged and retried on the next tick.
pub async fn refresh_loop<P: ClimateDataProvider>(
    provider: Arc<P>,
    lookback_days: u32,
    history: SharedHistory,
    period: Duration,
) {
    // ---
    let mut ticker = refresh_ticker(period);
    loop {
        ticker.tick().await;
        match run_assessment(provider.as_ref(), lookback_days, &history).await {
            Ok(assessment) => info!(
                level = ?assessment.level,
                score = assessment.score,
                confidence = assessment.confidence,
                "Periodic assessment complete"
            ),
            Err(e) => warn!("Periodic assessment failed: {:#}", e),
        }
    }
}
