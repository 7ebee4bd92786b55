use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::analytics::export::DEFAULT_EXPORT_FILE_NAME;
use crate::charts::{self, ChartKind};

const ENABLE_LOGS: bool = true;

const DEFAULT_AUTO_ADVANCE_MS: u64 = 12_000;
const DEBUG_AUTO_ADVANCE_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeckSettings {
    pub total_slides: u32,
    pub start_slide: u32,
    pub auto_advance_interval_ms: u64,
    pub export_file_name: String,
    pub chart_slides: BTreeMap<ChartKind, u32>,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            total_slides: 14,
            start_slide: 1,
            auto_advance_interval_ms: DEFAULT_AUTO_ADVANCE_MS,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.into(),
            chart_slides: charts::default_bindings(),
        }
    }
}

impl DeckSettings {
    /// Defaults, with a short auto-advance when `PITCHDECK_DEBUG` is set.
    pub fn from_env() -> Self {
        let debug_mode = std::env::var("PITCHDECK_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            auto_advance_interval_ms: if debug_mode {
                DEBUG_AUTO_ADVANCE_MS
            } else {
                DEFAULT_AUTO_ADVANCE_MS
            },
            ..Self::default()
        }
    }

    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_millis(self.auto_advance_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_slides == 0 {
            bail!("total_slides must be at least 1");
        }
        if self.start_slide < 1 || self.start_slide > self.total_slides {
            bail!(
                "start_slide {} is outside 1..={}",
                self.start_slide,
                self.total_slides
            );
        }
        if self.auto_advance_interval_ms == 0 {
            bail!("auto_advance_interval_ms must be greater than zero");
        }
        if self.export_file_name.trim().is_empty() {
            bail!("export_file_name must not be empty");
        }
        Ok(())
    }
}

/// JSON-file backed settings, read once at startup.
pub struct SettingsStore {
    path: PathBuf,
    data: DeckSettings,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::with_defaults(path, DeckSettings::default())
    }

    /// Loads `path` if it exists; `defaults` fill a missing or malformed file.
    pub fn with_defaults(path: PathBuf, defaults: DeckSettings) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str::<DeckSettings>(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    crate::log_warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    defaults
                }
            }
        } else {
            defaults
        };

        data.validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> DeckSettings {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("deck.json")).unwrap();

        let settings = store.settings();
        assert_eq!(settings, DeckSettings::default());
        assert_eq!(settings.chart_slides[&ChartKind::Revenue], 6);
        assert_eq!(settings.auto_advance_interval(), Duration::from_secs(12));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "total_slides": 5, "chart_slides": {{ "opportunity": 2 }} }}"#
        )
        .unwrap();

        let settings = SettingsStore::new(file.path().to_path_buf())
            .unwrap()
            .settings();
        assert_eq!(settings.total_slides, 5);
        assert_eq!(settings.start_slide, 1);
        assert_eq!(
            settings.chart_slides,
            BTreeMap::from([(ChartKind::Opportunity, 2)])
        );
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let store = SettingsStore::new(file.path().to_path_buf()).unwrap();
        assert_eq!(store.settings(), DeckSettings::default());
    }

    #[test]
    fn out_of_range_start_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "total_slides": 3, "start_slide": 4 }}"#).unwrap();

        assert!(SettingsStore::new(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn store_remembers_its_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        assert_eq!(store.path(), path.as_path());
        assert!(!path.exists());
    }
}
