use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::navigator::{Transition, TransitionListener};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SlideVisibility {
    Previous,
    Active,
    Upcoming,
}

/// Everything a rendering surface needs to show the deck at one position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeckView {
    pub current: u32,
    pub total: u32,
    /// Indexed by slide number minus one.
    pub slides: Vec<SlideVisibility>,
    pub active_indicator: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl DeckView {
    pub fn at(current: u32, total: u32) -> Self {
        let slides = (1..=total)
            .map(|slide| match slide.cmp(&current) {
                std::cmp::Ordering::Less => SlideVisibility::Previous,
                std::cmp::Ordering::Equal => SlideVisibility::Active,
                std::cmp::Ordering::Greater => SlideVisibility::Upcoming,
            })
            .collect();

        Self {
            current,
            total,
            slides,
            active_indicator: current,
            previous_enabled: current > 1,
            next_enabled: current < total,
        }
    }
}

/// Whatever draws the deck. The core only tells it what changed.
pub trait SlideSurface: Send {
    fn show(&mut self, view: &DeckView);

    fn presentation_mode_changed(&mut self, _presenting: bool) {}
}

/// Surface that only writes to the log; used by the headless binary.
#[derive(Debug, Default)]
pub struct LogSurface;

impl SlideSurface for LogSurface {
    fn show(&mut self, view: &DeckView) {
        log::info!(
            "showing slide {}/{} (prev {}, next {})",
            view.current,
            view.total,
            if view.previous_enabled { "on" } else { "off" },
            if view.next_enabled { "on" } else { "off" },
        );
    }

    fn presentation_mode_changed(&mut self, presenting: bool) {
        log::info!("presentation mode {}", if presenting { "entered" } else { "left" });
    }
}

pub type SharedSurface = Arc<Mutex<dyn SlideSurface>>;

pub fn shared_surface(surface: impl SlideSurface + 'static) -> SharedSurface {
    Arc::new(Mutex::new(surface))
}

pub(crate) fn with_surface(surface: &SharedSurface, f: impl FnOnce(&mut dyn SlideSurface)) {
    let mut guard = surface.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut *guard);
}

/// Adapts a shared surface into a navigator listener.
pub struct SurfaceNotifier {
    surface: SharedSurface,
    total: u32,
}

impl SurfaceNotifier {
    pub fn new(surface: SharedSurface, total: u32) -> Self {
        Self { surface, total }
    }
}

impl TransitionListener for SurfaceNotifier {
    fn on_transition(&mut self, transition: &Transition) {
        let view = DeckView::at(transition.to, self.total);
        with_surface(&self.surface, |surface| surface.show(&view));
    }
}
