use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Calendar dates on the wire: `YYYY-MM-DD`, zero-padded.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Event timestamps on the wire: `YYYY-MM-DDTHH:mm:ss`, athlete-local
/// wall-clock time with no zone suffix.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What intervals.icu sends back may carry fractional seconds.
const FETCHED_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A string that does not satisfy one of the wire formats above.
#[derive(Debug, Error)]
#[error("invalid value '{value}': format must be {expected}")]
pub struct FormatError {
    pub value: String,
    pub expected: &'static str,
}

impl FormatError {
    fn new(value: &str, expected: &'static str) -> Self {
        Self {
            value: value.to_string(),
            expected,
        }
    }
}

/// Parses a `YYYY-MM-DD` calendar date. Strict: zero-padded fields only,
/// no time part, impossible dates rejected.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, FormatError> {
    if raw.len() != 10 {
        return Err(FormatError::new(raw, "YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(raw, CALENDAR_DATE_FORMAT)
        .map_err(|_| FormatError::new(raw, "YYYY-MM-DD"))
}

/// Parses a caller-supplied `YYYY-MM-DDTHH:mm:ss` local timestamp. Strict:
/// seconds are required, fractional seconds and zone suffixes are not
/// accepted. This is the shape intervals.icu expects on writes.
pub fn parse_local_datetime(raw: &str) -> Result<NaiveDateTime, FormatError> {
    if raw.len() != 19 {
        return Err(FormatError::new(raw, "YYYY-MM-DDTHH:mm:ss (ISO-8601 local)"));
    }
    NaiveDateTime::parse_from_str(raw, LOCAL_DATETIME_FORMAT)
        .map_err(|_| FormatError::new(raw, "YYYY-MM-DDTHH:mm:ss (ISO-8601 local)"))
}

/// Parses a timestamp read back from intervals.icu. Tolerates the optional
/// fractional seconds the API emits, rejects anything else.
pub fn parse_fetched_datetime(raw: &str) -> Result<NaiveDateTime, FormatError> {
    NaiveDateTime::parse_from_str(raw, FETCHED_DATETIME_FORMAT)
        .map_err(|_| FormatError::new(raw, "YYYY-MM-DDTHH:mm:ss[.SSS]"))
}
