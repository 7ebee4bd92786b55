use std::{
    path::{Path, PathBuf},
    sync::{Arc, Weak},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::analytics::{self, AnalyticsSnapshot};
use crate::log_info;

use super::{DeckSession, DeckView, Transition};

const ENABLE_LOGS: bool = true;

struct AutoAdvance {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
    interval: Duration,
}

/// Control handle for a running deck. Cheap to clone; every clone drives the
/// same session, and the auto-advance ticker goes through it too.
#[derive(Clone)]
pub struct DeckController {
    session: Arc<Mutex<DeckSession>>,
    ticker: Arc<Mutex<Option<AutoAdvance>>>,
    default_interval: Duration,
    export_file_name: PathBuf,
    started_at: DateTime<Utc>,
}

impl DeckController {
    pub fn new(session: DeckSession, default_interval: Duration, export_file_name: impl Into<PathBuf>) -> Self {
        let started_at = Utc::now();
        info!(
            "Deck session started at {} with {} slides",
            started_at.to_rfc3339(),
            session.total()
        );

        Self {
            session: Arc::new(Mutex::new(session)),
            ticker: Arc::new(Mutex::new(None)),
            default_interval,
            export_file_name: export_file_name.into(),
            started_at,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub async fn current(&self) -> u32 {
        self.session.lock().await.current()
    }

    pub async fn view(&self) -> DeckView {
        self.session.lock().await.view()
    }

    pub async fn next(&self) -> Option<Transition> {
        self.session.lock().await.next()
    }

    pub async fn previous(&self) -> Option<Transition> {
        self.session.lock().await.previous()
    }

    pub async fn goto(&self, slide: u32) -> Option<Transition> {
        self.session.lock().await.goto(slide)
    }

    pub async fn last(&self) -> Option<Transition> {
        let mut session = self.session.lock().await;
        let total = session.total();
        session.goto(total)
    }

    pub async fn refresh_charts(&self) {
        self.session.lock().await.refresh_charts();
    }

    pub async fn snapshot(&self) -> AnalyticsSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Writes a snapshot to `path`, or to the configured file name.
    pub async fn export(&self, path: Option<&Path>) -> Result<PathBuf> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.export_file_name.clone());
        let snapshot = self.snapshot().await;
        analytics::export_to_file(&snapshot, &target)?;
        Ok(target)
    }

    pub async fn is_auto_advancing(&self) -> bool {
        self.ticker.lock().await.is_some()
    }

    /// Starts the repeating advance. Calling it again with the same interval
    /// is a no-op; a different interval restarts the timer.
    pub async fn start_auto_advance(&self, interval: Option<Duration>) -> Result<()> {
        let interval = interval.unwrap_or(self.default_interval);
        if interval.is_zero() {
            bail!("auto-advance interval must be greater than zero");
        }

        let mut ticker_guard = self.ticker.lock().await;
        if let Some(running) = ticker_guard.as_ref() {
            if running.interval == interval {
                return Ok(());
            }
        }
        if let Some(previous) = ticker_guard.take() {
            shutdown(previous).await?;
        }

        // The ticker must not keep a dropped deck alive.
        let session: Weak<Mutex<DeckSession>> = Arc::downgrade(&self.session);
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token_clone.cancelled() => break,
                    _ = ticks.tick() => {
                        let Some(session) = session.upgrade() else {
                            log_info!("deck dropped, auto-advance ending");
                            break;
                        };
                        let step = session.lock().await.advance_or_wrap();
                        if let Some(t) = step {
                            log_info!("auto-advanced {} -> {}", t.from, t.to);
                        }
                    }
                }
            }
        });

        *ticker_guard = Some(AutoAdvance {
            handle,
            cancel_token,
            interval,
        });
        info!("Auto-advance started ({} ms intervals)", interval.as_millis());
        Ok(())
    }

    /// Returns whether a timer was running. Safe to call repeatedly.
    pub async fn stop_auto_advance(&self) -> Result<bool> {
        let running = self.ticker.lock().await.take();
        match running {
            Some(auto) => {
                shutdown(auto).await?;
                info!("Auto-advance stopped");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flips auto-advance and returns the new state.
    pub async fn toggle_auto_advance(&self) -> Result<bool> {
        if self.stop_auto_advance().await? {
            Ok(false)
        } else {
            self.start_auto_advance(None).await?;
            Ok(true)
        }
    }

    /// A hidden deck stops advancing on its own.
    pub async fn visibility_changed(&self, hidden: bool) -> Result<()> {
        if hidden {
            self.stop_auto_advance().await?;
        }
        Ok(())
    }

    pub async fn start_presentation(&self) {
        let mut session = self.session.lock().await;
        session.goto(1);
        session.set_presenting(true);
    }

    /// Stops auto-advance, leaves presentation mode and returns the summary lines.
    pub async fn end_presentation(&self) -> Result<Vec<String>> {
        // No tick may land between the snapshot and the summary.
        self.stop_auto_advance().await?;

        let snapshot = self.snapshot().await;
        let summary = analytics::generate_summary(&snapshot);
        info!("Presentation summary: {}", summary.join("; "));

        self.session.lock().await.set_presenting(false);
        Ok(summary)
    }
}

async fn shutdown(auto: AutoAdvance) -> Result<()> {
    auto.cancel_token.cancel();
    auto.handle
        .await
        .context("auto-advance task failed to join")
}
