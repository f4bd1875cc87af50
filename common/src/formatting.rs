// Date/time display for rendered pages

use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Display style for show start times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// e.g. `Mon 05, 21, 2035 9:30PM`
    #[default]
    Medium,
    /// e.g. `Monday May, 21, 2035 at 9:30PM`
    Full,
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medium" => Ok(DateStyle::Medium),
            "full" => Ok(DateStyle::Full),
            other => Err(format!("unknown date format '{}'", other)),
        }
    }
}

pub fn format_datetime(ts: &DateTime<Utc>, style: DateStyle) -> String {
    match style {
        DateStyle::Medium => ts.format("%a %m, %d, %Y %-I:%M%p").to_string(),
        DateStyle::Full => ts.format("%A %B, %-d, %Y at %-I:%M%p").to_string(),
    }
}

/// Parse an RFC 3339 timestamp (as serialized into templates) and format it
pub fn format_rfc3339(raw: &str, style: DateStyle) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| format_datetime(&ts.with_timezone(&Utc), style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_medium_format() {
        let ts = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(format_datetime(&ts, DateStyle::Medium), "Sun 04, 01, 2035 8:00PM");
    }

    #[test]
    fn test_full_format() {
        let ts = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(
            format_datetime(&ts, DateStyle::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
    }

    #[test]
    fn test_morning_hour_not_padded() {
        let ts = Utc.with_ymd_and_hms(2019, 5, 21, 9, 5, 0).unwrap();
        assert_eq!(format_datetime(&ts, DateStyle::Medium), "Tue 05, 21, 2019 9:05AM");
        assert_eq!(
            format_datetime(&ts, DateStyle::Full),
            "Tuesday May, 21, 2019 at 9:05AM"
        );
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(
            format_rfc3339("2019-05-21T21:30:00Z", DateStyle::Medium).as_deref(),
            Some("Tue 05, 21, 2019 9:30PM")
        );
        assert_eq!(format_rfc3339("not a date", DateStyle::Medium), None);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("full".parse::<DateStyle>(), Ok(DateStyle::Full));
        assert!("short".parse::<DateStyle>().is_err());
    }
}
