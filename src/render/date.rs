use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use thiserror::Error;
use tracing::debug;

/// Timestamp layout used by the Jira REST API, e.g.
/// `2021-05-01T10:00:00.000+0000`. The fraction is optional and may carry
/// up to nanosecond precision.
pub const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

pub const DEFAULT_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
#[error("invalid date format {0:?}")]
pub struct InvalidDateFormat(pub String);

/// A strftime pattern checked up front, so formatting can never fail
/// halfway through a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self, InvalidDateFormat> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(InvalidDateFormat(pattern.to_string()));
        }
        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_OUTPUT_FORMAT.to_string())
    }
}

/// Re-format an API timestamp. Empty or unparseable input yields an empty
/// string; the timestamp keeps its own UTC offset.
pub fn normalize(raw: &str, format: &DateFormat) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match DateTime::parse_from_str(raw, API_FORMAT) {
        Ok(dt) => dt.format(format.as_str()).to_string(),
        Err(err) => {
            debug!(raw, error = %err, "failed to parse timestamp");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(pattern: &str) -> DateFormat {
        DateFormat::new(pattern).unwrap()
    }

    #[test]
    fn nanosecond_input_to_date_only() {
        let out = normalize("2021-05-01T10:00:00.000000000+0000", &fmt("%Y-%m-%d"));
        assert_eq!(out, "2021-05-01");
    }

    #[test]
    fn default_format() {
        let out = normalize("2021-05-01T10:04:05.123+0000", &DateFormat::default());
        assert_eq!(out, "2021-05-01 10:04:05");
    }

    #[test]
    fn keeps_source_offset() {
        let out = normalize("2021-05-01T23:30:00.000+0200", &DateFormat::default());
        assert_eq!(out, "2021-05-01 23:30:00");
    }

    #[test]
    fn fraction_is_optional() {
        let out = normalize("2021-05-01T10:00:00+0000", &fmt("%H:%M"));
        assert_eq!(out, "10:00");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize("", &DateFormat::default()), "");
    }

    #[test]
    fn malformed_input_is_empty() {
        assert_eq!(normalize("yesterday", &DateFormat::default()), "");
        assert_eq!(normalize("2021-13-01T10:00:00.000+0000", &DateFormat::default()), "");
        assert_eq!(normalize("2021-05-01 10:00:00", &DateFormat::default()), "");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(DateFormat::new("%Y-%Q").is_err());
        assert!(DateFormat::new("%d.%m.%Y").is_ok());
    }
}
