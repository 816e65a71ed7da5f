//! Format utilities for display

use chrono::{DateTime, Utc};

/// Compact point count: `950`, `1.5K`, `2.3M`
pub fn format_points(points: u64) -> String {
    if points >= 1_000_000 {
        return format!("{:.1}M", points as f64 / 1_000_000.0);
    }
    if points >= 1000 {
        return format!("{:.1}K", points as f64 / 1000.0);
    }
    points.to_string()
}

/// Distance in kilometers: `420 km`, `12.8k km`
pub fn format_distance(km: f64) -> String {
    if km >= 1000.0 {
        return format!("{:.1}k km", km / 1000.0);
    }
    format!("{} km", km)
}

/// Relative age of `date` as seen from `now`
///
/// Anything newer than a minute (including future dates) is "Just now";
/// anything older than a week falls back to the calendar date.
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds();

    if seconds < 60 {
        return "Just now".to_string();
    }
    if seconds < 3600 {
        return format!("{}m ago", seconds / 60);
    }
    if seconds < 86_400 {
        return format!("{}h ago", seconds / 3600);
    }
    if seconds < 604_800 {
        return format!("{}d ago", seconds / 86_400);
    }

    date.format("%Y-%m-%d").to_string()
}

/// Cut `text` to `max_chars` characters, marking the cut with "..."
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Up to two upper-case initials from a display name
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(1000), "1.0K");
        assert_eq!(format_points(1500), "1.5K");
        assert_eq!(format_points(999_999), "1000.0K");
        assert_eq!(format_points(2_340_000), "2.3M");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(420.0), "420 km");
        assert_eq!(format_distance(12.5), "12.5 km");
        assert_eq!(format_distance(12_840.0), "12.8k km");
    }

    #[test]
    fn test_format_relative_date() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert_eq!(format_relative_date(now, now), "Just now");
        assert_eq!(format_relative_date(now + Duration::minutes(5), now), "Just now");
        assert_eq!(format_relative_date(now - Duration::seconds(59), now), "Just now");
        assert_eq!(format_relative_date(now - Duration::minutes(12), now), "12m ago");
        assert_eq!(format_relative_date(now - Duration::hours(5), now), "5h ago");
        assert_eq!(format_relative_date(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_relative_date(now - Duration::days(10), now), "2024-06-05");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Kyoto", 10), "Kyoto");
        assert_eq!(truncate_text("Kyoto", 5), "Kyoto");
        assert_eq!(truncate_text("Sunrise over Kyoto", 7), "Sunrise...");
        assert_eq!(truncate_text("Zürich café", 6), "Zürich...");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada lovelace"), "AL");
        assert_eq!(initials("Jean Claude Van Damme"), "JC");
        assert_eq!(initials("Émile"), "É");
        assert_eq!(initials("  spaced  out "), "SO");
        assert_eq!(initials(""), "");
    }
}
