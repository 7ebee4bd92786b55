use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time analytics for a presentation session. Serialises to the
/// export document; integer map keys become slide-index strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_presentation_time: u64,
    pub slide_time_spent: BTreeMap<u32, u64>,
    pub slide_visits: BTreeMap<u32, u64>,
    pub current_slide: u32,
    pub completion_rate: f64,
    pub average_time_per_slide: f64,
    pub most_viewed_slide: String,
    pub engagement_score: f64,
}

impl AnalyticsSnapshot {
    pub fn total_dwell_ms(&self) -> u64 {
        self.slide_time_spent.values().sum()
    }

    pub fn distinct_slides_visited(&self) -> usize {
        self.slide_visits.values().filter(|&&v| v > 0).count()
    }
}
