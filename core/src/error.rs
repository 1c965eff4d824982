use chrono::NaiveDateTime;
use thiserror::Error;

/// Everything the client layer can fail with. Structured, not stringly:
/// every variant carries enough for an agent to understand what went wrong
/// and how to fix it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// intervals.icu answered with a non-success status, or the request
    /// never completed. `status` is None for transport-level failures.
    /// `operation` names the failed call; guard reads tag it with the
    /// event id (`fetch_event_for_update-7`).
    #[error("intervals.icu API error [{operation}]: {} - {message}", status_label(.status))]
    Api {
        operation: String,
        status: Option<u16>,
        message: String,
    },

    /// A payload did not match its declared shape. `detail` carries the
    /// underlying decoder error verbatim; bad data is surfaced, never coerced.
    #[error("invalid payload in {operation}: {detail}")]
    Validation { operation: String, detail: String },

    /// The temporal guard refused a calendar mutation. `action` is the verb
    /// that was rejected ("create", "modify", "delete").
    #[error("cannot {action} events in the past (event starts {start})")]
    PastEvent {
        action: &'static str,
        start: NaiveDateTime,
    },

    /// A mutation targeted an event id the calendar does not have.
    #[error("event {id} not found")]
    EventNotFound { id: i64 },
}

impl ClientError {
    /// Machine-readable code for this error, from [`codes`].
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Api { .. } => codes::API_ERROR,
            ClientError::Validation { .. } => codes::VALIDATION_FAILED,
            ClientError::PastEvent { .. } => codes::PAST_EVENT_LOCKED,
            ClientError::EventNotFound { .. } => codes::NOT_FOUND,
        }
    }

    /// HTTP status of the remote response, when the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "network".to_string(),
    }
}

/// Error codes used across the client and the MCP tools
pub mod codes {
    pub const API_ERROR: &str = "api_error";
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const PAST_EVENT_LOCKED: &str = "past_event_locked";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_render_status_and_operation() {
        let err = ClientError::Api {
            operation: "get_activities".to_string(),
            status: Some(403),
            message: "Invalid API key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "intervals.icu API error [get_activities]: 403 - Invalid API key"
        );
        assert_eq!(err.code(), codes::API_ERROR);
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn transport_failures_have_no_status() {
        let err = ClientError::Api {
            operation: "get_athlete_profile".to_string(),
            status: None,
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("network - connection refused"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn every_variant_maps_to_a_stable_code() {
        let past = ClientError::PastEvent {
            action: "modify",
            start: chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
                .expect("valid date")
                .and_hms_opt(10, 0, 0)
                .expect("valid time"),
        };
        assert_eq!(past.code(), codes::PAST_EVENT_LOCKED);
        assert_eq!(
            ClientError::EventNotFound { id: 7 }.code(),
            codes::NOT_FOUND
        );
        let validation = ClientError::Validation {
            operation: "get_activity".to_string(),
            detail: "missing field `id`".to_string(),
        };
        assert_eq!(validation.code(), codes::VALIDATION_FAILED);
    }
}
