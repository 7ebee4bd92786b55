use super::AnalyticsSnapshot;

/// Short, human-readable insights for the end-of-presentation log.
pub fn generate_summary(snapshot: &AnalyticsSnapshot) -> Vec<String> {
    let mut insights = Vec::new();

    if snapshot.completion_rate >= 100.0 {
        insights.push("Full presentation completed".to_string());
    } else {
        insights.push(format!("{:.1}% completion rate", snapshot.completion_rate));
    }

    if snapshot.engagement_score > 80.0 {
        insights.push("High engagement level".to_string());
    } else if snapshot.engagement_score > 60.0 {
        insights.push("Good engagement level".to_string());
    }

    let minutes = snapshot.total_presentation_time / 60_000;
    insights.push(format!("{minutes} minutes presentation time"));

    insights
}
