//! Display formatting for durations and release dates

use chrono::{DateTime, NaiveDate, Utc};

/// Rounded whole minutes, e.g. `"42 min"`. Empty when unknown or zero.
pub fn format_duration_from_millis(track_time_millis: Option<u64>) -> String {
    match track_time_millis {
        None | Some(0) => String::new(),
        Some(ms) => {
            let minutes = (ms as f64 / 60_000.0).round() as u64;
            format!("{} min", minutes)
        }
    }
}

/// Clock-style duration, e.g. `"2:05"`, or `"--:--"` when unknown or zero
pub fn format_clock_duration(track_time_millis: Option<u64>) -> String {
    match track_time_millis {
        None | Some(0) => "--:--".to_string(),
        Some(ms) => {
            let minutes = ms / 60_000;
            let seconds = (ms % 60_000) / 1000;
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

/// Short US-style date, e.g. `"Feb 23, 2025"`. Empty when unknown.
pub fn format_release_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => String::new(),
    }
}

/// Parses an API release date: RFC 3339 first, then a bare calendar date
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_are_rounded() {
        assert_eq!(format_duration_from_millis(None), "");
        assert_eq!(format_duration_from_millis(Some(0)), "");
        assert_eq!(format_duration_from_millis(Some(125_000)), "2 min");
        assert_eq!(format_duration_from_millis(Some(150_000)), "3 min");
        assert_eq!(format_duration_from_millis(Some(3_540_000)), "59 min");
    }

    #[test]
    fn clock_duration_pads_seconds() {
        assert_eq!(format_clock_duration(Some(125_000)), "2:05");
        assert_eq!(format_clock_duration(Some(59_999)), "0:59");
        assert_eq!(format_clock_duration(Some(3_725_000)), "62:05");
        assert_eq!(format_clock_duration(None), "--:--");
        assert_eq!(format_clock_duration(Some(0)), "--:--");
    }

    #[test]
    fn release_dates_parse_and_format() {
        let date = parse_release_date("2025-02-23T08:00:00Z");
        assert_eq!(format_release_date(date.as_ref()), "Feb 23, 2025");

        let date = parse_release_date("2024-11-05");
        assert_eq!(format_release_date(date.as_ref()), "Nov 5, 2024");

        assert!(parse_release_date("").is_none());
        assert!(parse_release_date("next tuesday").is_none());
        assert_eq!(format_release_date(None), "");
    }
}
