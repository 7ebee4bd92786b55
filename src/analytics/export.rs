use anyhow::{Context, Result};
use std::{fs, path::Path};

use super::AnalyticsSnapshot;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "pitch-analytics.json";

pub fn to_json(snapshot: &AnalyticsSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("Failed to serialise analytics snapshot")
}

/// Writes the snapshot as pretty JSON, creating missing parent directories.
pub fn export_to_file(snapshot: &AnalyticsSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory {}", parent.display()))?;
    }

    let serialized = to_json(snapshot)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write analytics to {}", path.display()))?;

    log::info!("Exported presentation analytics to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn sample() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_presentation_time: 1_500,
            slide_time_spent: BTreeMap::from([(1, 1_000), (2, 500), (3, 0)]),
            slide_visits: BTreeMap::from([(1, 1), (2, 1), (3, 1)]),
            current_slide: 3,
            completion_rate: 100.0,
            average_time_per_slide: 500.0,
            most_viewed_slide: "1".into(),
            engagement_score: 100.0,
        }
    }

    #[test]
    fn export_document_uses_expected_field_names() {
        let json: Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();

        assert_eq!(json["totalPresentationTime"], 1_500);
        assert_eq!(json["slideTimeSpent"]["1"], 1_000);
        assert_eq!(json["slideTimeSpent"]["3"], 0);
        assert_eq!(json["slideVisits"]["2"], 1);
        assert_eq!(json["currentSlide"], 3);
        assert_eq!(json["completionRate"], 100.0);
        assert_eq!(json["averageTimePerSlide"], 500.0);
        assert_eq!(json["mostViewedSlide"], "1");
        assert_eq!(json["engagementScore"], 100.0);
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn export_is_pretty_printed() {
        let text = to_json(&sample()).unwrap();
        assert!(text.contains("\n  \"totalPresentationTime\": 1500"));
    }

    #[test]
    fn export_writes_into_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join(DEFAULT_EXPORT_FILE_NAME);

        export_to_file(&sample(), &path).unwrap();

        let parsed: AnalyticsSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, sample());
    }
}
