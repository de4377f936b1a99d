//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Duration, Utc};

/// Escape characters that are special in Telegram's legacy Markdown mode.
/// Only `_`, `*`, `` ` `` and `[` are escapable there; anything more would
/// show up as literal backslashes.
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', r"\_")
        .replace('*', r"\*")
        .replace('`', r"\`")
        .replace('[', r"\[")
}

/// Build an inline mention link for a user
pub fn mention(user_id: i64, display_name: &str) -> String {
    format!("[{}](tg://user?id={})", escape_markdown(display_name), user_id)
}

/// Format the time remaining until a deadline for user display
pub fn format_time_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = deadline.signed_duration_since(now);

    if diff <= Duration::zero() {
        "expired".to_string()
    } else if diff < Duration::minutes(1) {
        "less than a minute".to_string()
    } else if diff < Duration::hours(1) {
        format!("{} minutes", diff.num_minutes())
    } else {
        format!("{}h {}min", diff.num_hours(), diff.num_minutes() % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("*bold*"), r"\*bold\*");
        assert_eq!(escape_markdown("under_score"), r"under\_score");
        assert_eq!(escape_markdown("plain. text!"), "plain. text!");
    }

    #[test]
    fn test_mention() {
        assert_eq!(mention(42, "Alice"), "[Alice](tg://user?id=42)");
        assert_eq!(mention(7, "a_b"), r"[a\_b](tg://user?id=7)");
    }

    #[test]
    fn test_format_time_until() {
        let now = Utc::now();
        assert_eq!(format_time_until(now - Duration::minutes(5), now), "expired");
        assert_eq!(format_time_until(now + Duration::seconds(30), now), "less than a minute");
        assert_eq!(format_time_until(now + Duration::minutes(42), now), "42 minutes");
        assert_eq!(
            format_time_until(now + Duration::minutes(90), now),
            "1h 30min"
        );
    }
}
