use anyhow::Result;
use std::sync::Arc;

use crate::analytics::{AnalyticsRecorder, AnalyticsSnapshot};
use crate::charts::{ChartProvider, ChartRegistry};
use crate::clock::Clock;
use crate::settings::DeckSettings;

use super::navigator::{Navigator, Transition, TransitionListener};
use super::view::{shared_surface, with_surface, DeckView, SharedSurface, SlideSurface, SurfaceNotifier};

/// A navigator wired to its observers: analytics, the rendering surface and
/// the chart registry, notified in that order.
pub struct DeckSession {
    navigator: Navigator,
    analytics: AnalyticsRecorder,
    charts: ChartRegistry,
    surface: SharedSurface,
    presenting: bool,
}

impl DeckSession {
    pub fn new(
        settings: &DeckSettings,
        surface: impl SlideSurface + 'static,
        provider: impl ChartProvider + 'static,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        settings.validate()?;
        let total = settings.total_slides;
        let start = settings.start_slide;

        let mut navigator = Navigator::starting_at(total, start)?;
        let analytics = AnalyticsRecorder::new(total, start, clock);
        let charts = ChartRegistry::new(provider, settings.chart_slides.clone());
        let surface = shared_surface(surface);

        navigator.add_listener(analytics.clone());
        navigator.add_listener(SurfaceNotifier::new(surface.clone(), total));
        navigator.add_listener(charts.clone());

        let view = DeckView::at(start, total);
        with_surface(&surface, |s| s.show(&view));
        charts.render_all();

        Ok(Self {
            navigator,
            analytics,
            charts,
            surface,
            presenting: false,
        })
    }

    pub fn current(&self) -> u32 {
        self.navigator.current()
    }

    pub fn total(&self) -> u32 {
        self.navigator.total()
    }

    pub fn view(&self) -> DeckView {
        DeckView::at(self.navigator.current(), self.navigator.total())
    }

    pub fn is_presenting(&self) -> bool {
        self.presenting
    }

    pub fn add_listener(&mut self, listener: impl TransitionListener + 'static) {
        self.navigator.add_listener(listener);
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.navigator.next()
    }

    pub fn previous(&mut self) -> Option<Transition> {
        self.navigator.previous()
    }

    pub fn goto(&mut self, slide: u32) -> Option<Transition> {
        self.navigator.goto(slide)
    }

    /// One auto-advance step: forward, or back to the first slide from the last.
    pub fn advance_or_wrap(&mut self) -> Option<Transition> {
        if self.navigator.is_last() {
            self.navigator.goto(1)
        } else {
            self.navigator.next()
        }
    }

    pub fn set_presenting(&mut self, presenting: bool) {
        if self.presenting == presenting {
            return;
        }
        self.presenting = presenting;
        with_surface(&self.surface, |s| s.presentation_mode_changed(presenting));
    }

    /// Re-renders the charts on the current slide, e.g. after a viewport resize.
    pub fn refresh_charts(&self) {
        self.charts.render_for_slide(self.navigator.current());
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.analytics.snapshot()
    }
}

impl Drop for DeckSession {
    fn drop(&mut self) {
        self.charts.destroy_all();
    }
}
