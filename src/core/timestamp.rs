//! Conversion of source timestamps to Vietnam local time

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Offset-free layouts, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Applies a fixed UTC offset and renders `YYYY-MM-DD HH:MM:SS (label)`
#[derive(Debug, Clone)]
pub struct LocalTimeConverter {
    offset_hours: i32,
    label: String,
}

impl LocalTimeConverter {
    /// Converter adding `offset_hours` and appending `label`
    pub fn new(offset_hours: i32, label: impl Into<String>) -> Self {
        Self {
            offset_hours,
            label: label.into(),
        }
    }

    /// Convert a raw timestamp. Empty input gives an empty string, anything
    /// unparsable is passed through unchanged.
    pub fn convert(&self, raw: Option<&str>) -> String {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return String::new(),
        };

        let offset = match FixedOffset::east_opt(self.offset_hours * 3600) {
            Some(offset) => offset,
            None => return raw.to_string(),
        };

        match parse_utc(raw.trim()) {
            Some(utc) => format!(
                "{} ({})",
                utc.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S"),
                self.label
            ),
            None => {
                debug!("Unparsable timestamp, keeping raw value: {}", raw);
                raw.to_string()
            }
        }
    }
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
