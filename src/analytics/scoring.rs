use std::collections::BTreeMap;

/// Share of the deck reached, as a percentage.
pub fn completion_rate(current: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    current as f64 / total as f64 * 100.0
}

/// Breadth (distinct slides seen) and depth (completion) blended into 0..=100.
/// Half the weight goes to each; the result is capped at 100.
pub fn engagement_score(distinct_visited: usize, total: u32, completion_rate: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let breadth = distinct_visited as f64 / total as f64 * 50.0;
    let depth = completion_rate * 0.5;
    (breadth + depth).clamp(0.0, 100.0)
}

/// Lowest slide index among those with the highest visit count.
pub fn most_viewed_slide(visits: &BTreeMap<u32, u64>) -> Option<u32> {
    let mut best: Option<(u32, u64)> = None;
    for (&slide, &count) in visits {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((slide, count)),
        }
    }
    best.map(|(slide, _)| slide)
}
