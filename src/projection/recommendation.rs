use crate::models::Recommendation;

/// Advice sentence for a status string ("on-track", "caution", "critical").
/// Unrecognised statuses produce an empty string.
pub fn format_recommendation(status: &str, _subject: &str, needed: f64) -> String {
    status
        .parse::<Recommendation>()
        .map(|r| r.message(needed))
        .unwrap_or_default()
}
