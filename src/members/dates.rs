use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("empty date string")]
    Empty,

    #[error("unrecognized date '{0}'")]
    Unrecognized(String),
}

/// Parses a membership date written by hand into customer metadata
///
/// Accepted forms: `MM/DD/YYYY`, `M/D/YYYY`, `MM/DD/YY`, `M/D/YY`,
/// `YYYY-MM-DD`, `YYYY-M-D`, or a Unix timestamp in seconds. Dates resolve
/// to midnight UTC.
///
/// ```
/// use org_audit::members::parse_member_date;
///
/// let a = parse_member_date("1/2/2024").unwrap();
/// let b = parse_member_date("2024-01-02").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_member_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some(date) = parse_calendar_date(text) {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| DateParseError::Unrecognized(text.to_string()));
    }

    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| DateParseError::Unrecognized(text.to_string()))
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    if let Some((_, year)) = text.rsplit_once('/') {
        // %Y would read "24" as the year 24
        let format = if year.len() <= 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
        return NaiveDate::parse_from_str(text, format).ok();
    }

    if text.contains('-') {
        return NaiveDate::parse_from_str(text, "%Y-%m-%d").ok();
    }

    None
}
