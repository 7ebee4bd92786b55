pub mod export;
pub mod scoring;
pub mod summary;
mod types;

pub use export::{export_to_file, to_json};
pub use summary::generate_summary;
pub use types::AnalyticsSnapshot;

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::clock::Clock;
use crate::deck::{Transition, TransitionListener};

const ENABLE_LOGS: bool = false;

/// Per-slide dwell and visit tracking for one presentation session.
///
/// Clones share state, so one copy can be registered on the navigator while
/// another is kept around for snapshots.
pub struct AnalyticsRecorder {
    inner: Arc<Mutex<RecorderState>>,
    clock: Arc<dyn Clock>,
}

struct RecorderState {
    total_slides: u32,
    current: u32,
    session_started_ms: u64,
    /// Start of the current dwell window; moved forward on every flush.
    slide_started_ms: u64,
    dwell: BTreeMap<u32, u64>,
    visits: BTreeMap<u32, u64>,
}

impl RecorderState {
    fn flush(&mut self, now: u64) {
        let spent = now.saturating_sub(self.slide_started_ms);
        *self.dwell.entry(self.current).or_insert(0) += spent;
        self.slide_started_ms = now;
    }
}

impl AnalyticsRecorder {
    pub fn new(total_slides: u32, start_slide: u32, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let dwell = (1..=total_slides).map(|slide| (slide, 0)).collect();
        let mut visits: BTreeMap<u32, u64> = (1..=total_slides).map(|slide| (slide, 0)).collect();
        visits.insert(start_slide, 1);

        Self {
            inner: Arc::new(Mutex::new(RecorderState {
                total_slides,
                current: start_slide,
                session_started_ms: now,
                slide_started_ms: now,
                dwell,
                visits,
            })),
            clock,
        }
    }

    fn state(&self) -> MutexGuard<'_, RecorderState> {
        // Recorder state stays consistent across panics in listeners.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Closes the dwell window of the slide being left and counts a visit to
    /// the slide being entered.
    pub fn record_transition(&self, transition: &Transition) {
        let now = self.clock.now_ms();
        let mut state = self.state();
        state.current = transition.from;
        state.flush(now);
        state.current = transition.to;
        *state.visits.entry(transition.to).or_insert(0) += 1;

        crate::log_info!(
            "slide {} -> {} ({} visits)",
            transition.from,
            transition.to,
            state.visits[&transition.to]
        );
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let now = self.clock.now_ms();
        let mut state = self.state();
        state.flush(now);

        let total = state.total_slides;
        let dwell_sum: u64 = state.dwell.values().sum();
        let distinct = state.visits.values().filter(|&&count| count > 0).count();
        let completion_rate = scoring::completion_rate(state.current, total);
        let most_viewed = scoring::most_viewed_slide(&state.visits).unwrap_or(state.current);

        AnalyticsSnapshot {
            total_presentation_time: now.saturating_sub(state.session_started_ms),
            slide_time_spent: state.dwell.clone(),
            slide_visits: state.visits.clone(),
            current_slide: state.current,
            completion_rate,
            average_time_per_slide: dwell_sum as f64 / total as f64,
            most_viewed_slide: most_viewed.to_string(),
            engagement_score: scoring::engagement_score(distinct, total, completion_rate),
        }
    }
}

impl Clone for AnalyticsRecorder {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl TransitionListener for AnalyticsRecorder {
    fn on_transition(&mut self, transition: &Transition) {
        self.record_transition(transition);
    }
}
