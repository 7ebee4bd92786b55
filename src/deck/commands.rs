use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Context};

use crate::analytics;

use super::DeckController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckCommand {
    Next,
    Previous,
    Goto(u32),
    First,
    Last,
    AutoAdvance(Option<u64>),
    Stop,
    Present,
    End,
    Refresh,
    Snapshot,
    Export(Option<PathBuf>),
    Quit,
}

impl FromStr for DeckCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| anyhow!("empty command"))?
            .to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments for '{name}'");
        }

        let command = match (name.as_str(), arg) {
            ("next" | "n", None) => DeckCommand::Next,
            ("prev" | "previous" | "p", None) => DeckCommand::Previous,
            ("goto" | "g", Some(raw)) => DeckCommand::Goto(slide_number(raw)?),
            ("first" | "home", None) => DeckCommand::First,
            ("last" | "end-slide", None) => DeckCommand::Last,
            ("auto", None) => DeckCommand::AutoAdvance(None),
            ("auto", Some(raw)) => DeckCommand::AutoAdvance(Some(
                raw.parse()
                    .with_context(|| format!("'{raw}' is not an interval in ms"))?,
            )),
            ("stop", None) => DeckCommand::Stop,
            ("present", None) => DeckCommand::Present,
            ("end", None) => DeckCommand::End,
            ("refresh", None) => DeckCommand::Refresh,
            ("snapshot" | "stats", None) => DeckCommand::Snapshot,
            ("export", path) => DeckCommand::Export(path.map(PathBuf::from)),
            ("quit" | "exit" | "q", None) => DeckCommand::Quit,
            ("goto" | "g", None) => bail!("'goto' needs a slide number"),
            (other, _) => bail!("unknown command '{other}'"),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    Message(String),
    Quit,
}

/// Runs one command against the deck; errors come back as display strings.
pub async fn execute(deck: &DeckController, command: DeckCommand) -> Result<CommandReply, String> {
    let message = match command {
        DeckCommand::Next => {
            deck.next().await;
            position(deck).await
        }
        DeckCommand::Previous => {
            deck.previous().await;
            position(deck).await
        }
        DeckCommand::Goto(slide) => {
            deck.goto(slide).await;
            position(deck).await
        }
        DeckCommand::First => {
            deck.goto(1).await;
            position(deck).await
        }
        DeckCommand::Last => {
            deck.last().await;
            position(deck).await
        }
        DeckCommand::AutoAdvance(ms) => {
            deck.start_auto_advance(ms.map(Duration::from_millis))
                .await
                .map_err(|e| e.to_string())?;
            "auto-advance on".to_string()
        }
        DeckCommand::Stop => {
            let was_running = deck.stop_auto_advance().await.map_err(|e| e.to_string())?;
            if was_running {
                "auto-advance off".to_string()
            } else {
                "auto-advance was not running".to_string()
            }
        }
        DeckCommand::Present => {
            deck.start_presentation().await;
            position(deck).await
        }
        DeckCommand::End => deck
            .end_presentation()
            .await
            .map_err(|e| e.to_string())?
            .join("\n"),
        DeckCommand::Refresh => {
            deck.refresh_charts().await;
            "charts refreshed".to_string()
        }
        DeckCommand::Snapshot => {
            let snapshot = deck.snapshot().await;
            analytics::to_json(&snapshot).map_err(|e| e.to_string())?
        }
        DeckCommand::Export(path) => {
            let written = deck
                .export(path.as_deref())
                .await
                .map_err(|e| format!("{e:#}"))?;
            format!("analytics written to {}", written.display())
        }
        DeckCommand::Quit => return Ok(CommandReply::Quit),
    };

    Ok(CommandReply::Message(message))
}

async fn position(deck: &DeckController) -> String {
    let view = deck.view().await;
    format!("slide {}/{}", view.current, view.total)
}

/// Parses a `goto` argument. Any all-digit value, signed or too large for a
/// slide index, is well formed; the navigator rejects it as out of range.
fn slide_number(raw: &str) -> anyhow::Result<u32> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("'{raw}' is not a slide number");
    }
    if negative {
        return Ok(0);
    }
    Ok(digits.parse().unwrap_or(0))
}
