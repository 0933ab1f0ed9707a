use chrono::{DateTime, Utc};

/// Format an RFC 3339 timestamp the way the portal shows publication dates.
pub fn format_published_date(published_at: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(published_at).ok()?;
    Some(parsed.with_timezone(&Utc).format("%b %d, %Y").to_string())
}

pub fn time_ago(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - published_at).num_seconds().max(0);
    let (amount, unit) = match diff {
        0..=60 => return "Just now".to_string(),
        61..=3600 => (diff / 60, "minute"),
        3601..=86399 => (diff / 3600, "hour"),
        _ => (diff / 86400, "day"),
    };
    let plural = if amount > 1 { "s" } else { "" };
    format!("{} {}{} ago", amount, unit, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_published_date() {
        assert_eq!(
            format_published_date("2024-03-05T14:30:00Z").as_deref(),
            Some("Mar 05, 2024")
        );
        assert_eq!(
            format_published_date("2024-03-05T23:30:00-05:00").as_deref(),
            Some("Mar 06, 2024")
        );
        assert_eq!(format_published_date("yesterday"), None);
    }

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "Just now");
        assert_eq!(time_ago(now - Duration::seconds(120), now), "2 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(1) - Duration::seconds(5), now), "1 hour ago");
        assert_eq!(time_ago(now - Duration::days(3), now), "3 days ago");
        // Clock skew never yields negative ages
        assert_eq!(time_ago(now + Duration::minutes(5), now), "Just now");
    }
}
