pub mod specs;

pub use specs::{ChartKind, ChartSpec, ChartType, Dataset};

use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::deck::{Transition, TransitionListener};
use crate::{log_error, log_info};

const ENABLE_LOGS: bool = true;

/// Opaque id of a chart instance owned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// External charting backend.
pub trait ChartProvider: Send {
    fn render(&mut self, spec: &ChartSpec) -> Result<ChartHandle>;
    fn destroy(&mut self, handle: ChartHandle);
}

/// Provider that draws nothing and logs what it would have drawn.
#[derive(Debug, Default)]
pub struct LogChartProvider {
    next_id: u64,
}

impl ChartProvider for LogChartProvider {
    fn render(&mut self, spec: &ChartSpec) -> Result<ChartHandle> {
        self.next_id += 1;
        log::debug!(
            "rendering {} chart '{}' with {} series",
            spec.kind.as_str(),
            spec.title,
            spec.datasets.len()
        );
        Ok(ChartHandle(self.next_id))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        log::debug!("destroying chart instance {}", handle.0);
    }
}

/// Keeps at most one live instance per chart and re-renders charts as their
/// slides come into view.
pub struct ChartRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

struct RegistryState {
    provider: Box<dyn ChartProvider>,
    bindings: BTreeMap<ChartKind, u32>,
    live: BTreeMap<ChartKind, ChartHandle>,
}

impl ChartRegistry {
    pub fn new(provider: impl ChartProvider + 'static, bindings: BTreeMap<ChartKind, u32>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryState {
                provider: Box::new(provider),
                bindings,
                live: BTreeMap::new(),
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Destroys the previous instance of `kind`, if any, then renders it afresh.
    pub fn render(&self, kind: ChartKind) -> Result<()> {
        let mut state = self.state();
        if let Some(previous) = state.live.remove(&kind) {
            state.provider.destroy(previous);
        }

        let spec = kind.spec();
        let handle = state
            .provider
            .render(&spec)
            .with_context(|| format!("Failed to render {} chart", kind.as_str()))?;
        state.live.insert(kind, handle);
        Ok(())
    }

    /// Renders every bound chart; failures are logged, not returned.
    pub fn render_all(&self) {
        let kinds: Vec<ChartKind> = self.state().bindings.keys().copied().collect();
        for kind in kinds {
            self.render_logged(kind);
        }
    }

    pub fn render_for_slide(&self, slide: u32) {
        for kind in self.charts_on(slide) {
            self.render_logged(kind);
        }
    }

    pub fn charts_on(&self, slide: u32) -> Vec<ChartKind> {
        self.state()
            .bindings
            .iter()
            .filter(|(_, &bound)| bound == slide)
            .map(|(&kind, _)| kind)
            .collect()
    }

    #[cfg(test)]
    fn is_live(&self, kind: ChartKind) -> bool {
        self.state().live.contains_key(&kind)
    }

    pub fn destroy_all(&self) {
        let mut state = self.state();
        let live = std::mem::take(&mut state.live);
        for (_, handle) in live {
            state.provider.destroy(handle);
        }
    }

    fn render_logged(&self, kind: ChartKind) {
        match self.render(kind) {
            Ok(()) => log_info!("{} chart rendered", kind.as_str()),
            Err(e) => log_error!("{:#}", e),
        }
    }
}

impl Clone for ChartRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TransitionListener for ChartRegistry {
    fn on_transition(&mut self, transition: &Transition) {
        self.render_for_slide(transition.to);
    }
}

pub fn default_bindings() -> BTreeMap<ChartKind, u32> {
    ChartKind::ALL
        .iter()
        .map(|kind| (*kind, kind.default_slide()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[derive(Default)]
    struct Journal {
        events: Vec<String>,
        next_id: u64,
    }

    /// Test provider writing into a shared journal.
    #[derive(Clone, Default)]
    struct JournalProvider {
        journal: Arc<Mutex<Journal>>,
        fail_on: Option<ChartKind>,
    }

    impl ChartProvider for JournalProvider {
        fn render(&mut self, spec: &ChartSpec) -> Result<ChartHandle> {
            if self.fail_on == Some(spec.kind) {
                bail!("canvas missing");
            }
            let mut journal = self.journal.lock().unwrap();
            journal.next_id += 1;
            let id = journal.next_id;
            journal.events.push(format!("render {} #{id}", spec.kind.as_str()));
            Ok(ChartHandle(id))
        }

        fn destroy(&mut self, handle: ChartHandle) {
            self.journal
                .lock()
                .unwrap()
                .events
                .push(format!("destroy #{}", handle.0));
        }
    }

    fn events(provider: &JournalProvider) -> Vec<String> {
        provider.journal.lock().unwrap().events.clone()
    }

    #[test]
    fn rerender_destroys_previous_instance_first() {
        let provider = JournalProvider::default();
        let registry = ChartRegistry::new(provider.clone(), default_bindings());

        registry.render(ChartKind::Revenue).unwrap();
        registry.render(ChartKind::Revenue).unwrap();

        assert_eq!(
            events(&provider),
            vec!["render revenue #1", "destroy #1", "render revenue #2"]
        );
    }

    #[test]
    fn entering_bound_slide_renders_its_chart() {
        let provider = JournalProvider::default();
        let mut registry = ChartRegistry::new(provider.clone(), default_bindings());

        registry.on_transition(&Transition { from: 1, to: 2 });
        assert!(events(&provider).is_empty());

        registry.on_transition(&Transition { from: 2, to: 3 });
        assert_eq!(events(&provider), vec!["render opportunity #1"]);
        assert!(registry.is_live(ChartKind::Opportunity));
        assert!(!registry.is_live(ChartKind::Revenue));
    }

    #[test]
    fn custom_bindings_move_charts() {
        let bindings = BTreeMap::from([(ChartKind::Opportunity, 2), (ChartKind::Revenue, 2)]);
        let registry = ChartRegistry::new(JournalProvider::default(), bindings);

        assert_eq!(
            registry.charts_on(2),
            vec![ChartKind::Opportunity, ChartKind::Revenue]
        );
        assert!(registry.charts_on(3).is_empty());
    }

    #[test]
    fn provider_failure_is_swallowed_on_navigation() {
        let provider = JournalProvider {
            fail_on: Some(ChartKind::Opportunity),
            ..Default::default()
        };
        let mut registry = ChartRegistry::new(provider.clone(), default_bindings());

        assert!(registry.render(ChartKind::Opportunity).is_err());
        registry.on_transition(&Transition { from: 2, to: 3 });
        registry.render_all();

        assert!(!registry.is_live(ChartKind::Opportunity));
        assert_eq!(events(&provider), vec!["render revenue #1"]);
    }

    #[test]
    fn destroy_all_releases_every_instance() {
        let provider = JournalProvider::default();
        let registry = ChartRegistry::new(provider.clone(), default_bindings());

        registry.render_all();
        registry.destroy_all();

        assert!(!registry.is_live(ChartKind::Opportunity));
        assert!(!registry.is_live(ChartKind::Revenue));
        assert_eq!(
            events(&provider),
            vec![
                "render opportunity #1",
                "render revenue #2",
                "destroy #1",
                "destroy #2",
            ]
        );
    }
}
