use chrono::{DateTime, TimeZone, Utc};

/// "3 minutes ago" style label for `then`, relative to `now`.
pub fn humanize<Tz: TimeZone>(then: &DateTime<Tz>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    if secs < 1 {
        return "now".to_string();
    }
    let (count, unit) = match secs {
        s if s < 60 => (s, "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };
    match (count, unit) {
        (1, "hour") => "an hour ago".to_string(),
        (1, unit) => format!("a {unit} ago"),
        (n, unit) => format!("{n} {unit}s ago"),
    }
}

pub fn ago<Tz: TimeZone>(then: &DateTime<Tz>) -> String { humanize(then, Utc::now()) }
