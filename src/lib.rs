pub mod analytics;
pub mod charts;
pub mod cli;
pub mod clock;
pub mod deck;
pub mod settings;
pub mod utils;

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use charts::{ChartProvider, LogChartProvider};
use cli::Args;
use clock::SystemClock;
use deck::{
    commands::{execute, CommandReply, DeckCommand},
    DeckController, DeckSession, LogSurface, SlideSurface,
};
use settings::{DeckSettings, SettingsStore};

/// Builds a deck on the wall clock and hands back its control handle.
pub fn init(
    settings: &DeckSettings,
    surface: impl SlideSurface + 'static,
    provider: impl ChartProvider + 'static,
) -> Result<DeckController> {
    let session = DeckSession::new(settings, surface, provider, Arc::new(SystemClock::new()))?;
    Ok(DeckController::new(
        session,
        settings.auto_advance_interval(),
        settings.export_file_name.clone(),
    ))
}

/// Headless deck driven by line commands on stdin.
pub async fn run(args: Args) -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = SettingsStore::with_defaults(args.settings, DeckSettings::from_env())?;
    let settings = store.settings();
    info!(
        "Pitch deck loaded from {} ({} slides)",
        store.path().display(),
        settings.total_slides
    );
    info!("Commands: next, prev, goto <n>, first, last, auto [ms], stop, present, end, refresh, snapshot, export [path], quit");

    let deck = init(&settings, LogSurface, LogChartProvider::default())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<DeckCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!("{e:#}");
                continue;
            }
        };

        match execute(&deck, command).await {
            Ok(CommandReply::Message(message)) => println!("{message}"),
            Ok(CommandReply::Quit) => break,
            Err(e) => warn!("{e}"),
        }
    }

    deck.stop_auto_advance().await?;
    info!(
        "Deck closed on slide {} (session started {})",
        deck.current().await,
        deck.started_at().to_rfc3339()
    );
    Ok(())
}
