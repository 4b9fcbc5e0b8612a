// * Date Formatting
// * Turns the provider's timestamps into fixed-locale (pt-PT) long-form labels.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// * Epoch values above this are treated as milliseconds
const EPOCH_MILLIS_THRESHOLD: u64 = 100_000_000_000;

/// Parsed form of a provider timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

/// Parses ISO-like strings and epoch seconds/milliseconds
pub fn parse_date(raw: &str) -> Option<ParsedDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(ParsedDate::DateTime(dt.naive_local()));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ParsedDate::DateTime(dt));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(ParsedDate::Date(date));
    }

    raw.parse::<i64>().ok().and_then(parse_epoch)
}

/// Converts epoch seconds (or milliseconds, for large values) to a UTC datetime
pub fn parse_epoch(value: i64) -> Option<ParsedDate> {
    let dt = if value.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    };
    dt.map(|dt| ParsedDate::DateTime(dt.naive_utc()))
}

/// Formats a parsed date as `15 de janeiro de 2024, 10:30`
pub fn format_parsed(date: ParsedDate) -> String {
    match date {
        ParsedDate::DateTime(dt) => format!(
            "{}, {:02}:{:02}",
            format_day(dt.date()),
            dt.hour(),
            dt.minute()
        ),
        ParsedDate::Date(d) => format_day(d),
    }
}

/// Formats a raw timestamp; unparseable input is returned trimmed
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(parsed) => format_parsed(parsed),
        None => {
            tracing::debug!(raw, "Unrecognised date format, passing through");
            raw.trim().to_string()
        }
    }
}

fn format_day(date: NaiveDate) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_keeps_source_offset() {
        assert_eq!(format_date("2024-01-15T10:30:00+01:00"), "15 de janeiro de 2024, 10:30");
        assert_eq!(format_date("2024-03-05T08:05:00Z"), "5 de março de 2024, 08:05");
    }

    #[test]
    fn test_naive_datetime() {
        assert_eq!(format_date("2023-12-31T23:59:59.123"), "31 de dezembro de 2023, 23:59");
        assert_eq!(format_date("2023-06-01 07:00:00"), "1 de junho de 2023, 07:00");
    }

    #[test]
    fn test_date_only() {
        assert_eq!(format_date("2024-02-20"), "20 de fevereiro de 2024");
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        assert_eq!(format_date("1705314600"), "15 de janeiro de 2024, 10:30");
        assert_eq!(format_date("1705314600000"), "15 de janeiro de 2024, 10:30");
    }

    #[test]
    fn test_epoch_extremes_do_not_overflow() {
        assert_eq!(parse_epoch(i64::MIN), None);
        assert_eq!(parse_epoch(i64::MAX), None);
        assert_eq!(format_date("-9223372036854775808"), "-9223372036854775808");
    }

    #[test]
    fn test_unparseable_passthrough() {
        assert_eq!(format_date("  ontem  "), "ontem");
    }

    #[test]
    fn test_blank_is_not_parsed() {
        assert_eq!(parse_date("   "), None);
    }
}
