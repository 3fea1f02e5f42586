//! Human-readable formatting for sizes, ages and revalidation intervals

use chrono::{DateTime, Utc};

use crate::core::model::Revalidate;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY;

/// Format a byte count using the largest unit (up to GB) that keeps the value >= 1
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Round to two decimals and drop trailing zeros ("1.50" -> "1.5", "1.00" -> "1")
fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Elapsed time since `timestamp`, in its largest whole unit ("3d ago")
pub fn relative_time(timestamp: DateTime<Utc>) -> String {
    relative_time_from(timestamp, Utc::now())
}

pub fn relative_time_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        format!("{}s ago", seconds)
    }
}

/// Format a revalidation policy ("-", "never", "0s", "5 mins", "1 day", ...)
pub fn format_revalidate(value: Option<Revalidate>) -> String {
    let seconds = match value {
        None => return "-".to_string(),
        Some(Revalidate::Never) => return "never".to_string(),
        Some(Revalidate::Seconds(0)) => return "0s".to_string(),
        Some(Revalidate::Seconds(secs)) => secs,
    };

    let units: [(u64, &str, &str); 4] = [
        (YEAR, "year", "years"),
        (DAY, "day", "days"),
        (HOUR, "hour", "hours"),
        (MINUTE, "min", "mins"),
    ];

    for (size, singular, plural) in units {
        if seconds >= size {
            return if seconds == size {
                format!("1 {}", singular)
            } else {
                format!("{} {}", seconds / size, plural)
            };
        }
    }

    format!("{}s", seconds)
}

/// Shorten a URL for table display: anything over 49 chars becomes 45 chars + "..."
pub fn truncate_url(url: &str) -> String {
    if url.chars().count() > 49 {
        let head: String = url.chars().take(45).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_format_size_rounds_to_two_decimals() {
        // 1234 / 1024 = 1.205...
        assert_eq!(format_size(1234), "1.21 KB");
        // 10 GB stays in GB, there is no larger unit
        assert_eq!(format_size(10 * 1_073_741_824), "10 GB");
        assert_eq!(format_size(2048 * 1_073_741_824), "2048 GB");
    }

    #[test]
    fn test_relative_time_units() {
        let now = Utc::now();
        assert_eq!(relative_time_from(now, now), "0s ago");
        assert_eq!(relative_time_from(now - Duration::seconds(42), now), "42s ago");
        assert_eq!(relative_time_from(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time_from(now - Duration::minutes(125), now), "2h ago");
        assert_eq!(relative_time_from(now - Duration::days(3), now), "3d ago");
    }

    #[test]
    fn test_relative_time_future_clamps_to_zero() {
        let now = Utc::now();
        assert_eq!(relative_time_from(now + Duration::minutes(3), now), "0s ago");
    }

    #[test]
    fn test_format_revalidate_special_values() {
        assert_eq!(format_revalidate(None), "-");
        assert_eq!(format_revalidate(Some(Revalidate::Never)), "never");
        assert_eq!(format_revalidate(Some(Revalidate::Seconds(0))), "0s");
        assert_eq!(format_revalidate(Some(Revalidate::Seconds(45))), "45s");
    }

    #[test]
    fn test_format_revalidate_singular_units() {
        let fmt = |s| format_revalidate(Some(Revalidate::Seconds(s)));
        assert_eq!(fmt(60), "1 min");
        assert_eq!(fmt(3600), "1 hour");
        assert_eq!(fmt(86400), "1 day");
        assert_eq!(fmt(31_536_000), "1 year");
    }

    #[test]
    fn test_format_revalidate_floors_plural_units() {
        let fmt = |s| format_revalidate(Some(Revalidate::Seconds(s)));
        assert_eq!(fmt(90), "1 mins");
        assert_eq!(fmt(300), "5 mins");
        assert_eq!(fmt(7199), "1 hours");
        assert_eq!(fmt(86400 + 1), "1 days");
        assert_eq!(fmt(3 * 86400 + 5), "3 days");
        assert_eq!(fmt(2 * 31_536_000), "2 years");
    }

    #[test]
    fn test_truncate_url_boundary() {
        let exact = "a".repeat(49);
        assert_eq!(truncate_url(&exact), exact);

        let long = "b".repeat(50);
        let truncated = truncate_url(&long);
        assert_eq!(truncated, format!("{}...", "b".repeat(45)));
    }

    #[test]
    fn test_truncate_url_multibyte() {
        let url = format!("https://example.com/{}", "é".repeat(40));
        let truncated = truncate_url(&url);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 48);
    }
}
