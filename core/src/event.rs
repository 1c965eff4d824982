use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dates::{self, FormatError};

/// Categories intervals.icu is known to use today. Documentation, not a
/// gate: [`Event::category`] stays free-form so new upstream categories
/// keep parsing.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "WORKOUT",
    "RACE_A",
    "RACE_B",
    "RACE_C",
    "NOTE",
    "PLAN",
    "HOLIDAY",
    "SICK",
    "INJURED",
    "SET_EFTP",
    "FITNESS_DAYS",
    "SEASON_START",
    "TARGET",
    "SET_FITNESS",
];

/// A calendar entry: a planned workout, race, note, sick day and so on.
/// The only resource this system mutates, and the one the temporal guard
/// protects: an event whose start has passed is history and stays as it is.
#[derive(Debug, Serialize, Deserialize)]
pub struct Event {
    /// Absent until intervals.icu has assigned one
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    /// Calendar category (WORKOUT, RACE_A, NOTE, ...). A free-form string,
    /// NOT an enum: intervals.icu grows new categories and a strict enum
    /// would reject reads the day that happens. Known values are listed in
    /// [`KNOWN_CATEGORIES`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Start in athlete-local time. The guard decides past vs. future on
    /// this field.
    pub start_date_local: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Builder-syntax workout text for WORKOUT events, free text otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sport (Ride, Run, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    /// Planned duration in seconds
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub moving_time: Option<i64>,
    /// Planned distance in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_fitness_chart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_as_note: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub athlete_id: Option<String>,
    /// Undeclared upstream fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input for putting a new entry on the calendar. Same shape as [`Event`]
/// minus id and athlete_id, with the start pinned to the strict wire
/// format. Only supplied fields go on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Must be `YYYY-MM-DDTHH:mm:ss`, athlete-local
    pub start_date_local: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_fitness_chart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_as_note: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CreateEventRequest {
    /// Parses the start timestamp against the strict input format. The
    /// guard needs the parsed value; callers that only want validation can
    /// drop it.
    pub fn start(&self) -> Result<NaiveDateTime, FormatError> {
        dates::parse_local_datetime(&self.start_date_local)
    }
}

/// Partial patch for an existing event. The id travels next to the patch,
/// never inside it; the wire body contains exactly the supplied fields.
/// An empty patch is legal and leaves the event as it is.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    /// When supplied, must be `YYYY-MM-DDTHH:mm:ss`, athlete-local
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_fitness_chart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_as_note: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl UpdateEventRequest {
    /// Parses the new start timestamp when the patch carries one. The guard
    /// itself runs against the stored event, not against this value.
    pub fn start(&self) -> Result<Option<NaiveDateTime>, FormatError> {
        match &self.start_date_local {
            Some(raw) => dates::parse_local_datetime(raw).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn an_event_needs_only_a_start() {
        let event: Event =
            serde_json::from_value(json!({ "start_date_local": "2030-06-01T10:00:00" }))
                .expect("minimal event must parse");
        assert_eq!(event.id, None);
        assert_eq!(event.category, None);
    }

    #[test]
    fn events_without_a_start_fail() {
        let result: Result<Event, _> =
            serde_json::from_value(json!({ "id": 42, "name": "Orphan" }));
        assert!(result.is_err());
    }

    #[test]
    fn float_shaped_ids_and_durations_parse() {
        let event: Event = serde_json::from_value(json!({
            "id": 42.0,
            "start_date_local": "2030-06-01T10:00:00",
            "moving_time": 5400.0
        }))
        .expect("event must parse");
        assert_eq!(event.id, Some(42));
        assert_eq!(event.moving_time, Some(5400));
    }

    #[test]
    fn unknown_categories_still_parse() {
        let event: Event = serde_json::from_value(json!({
            "start_date_local": "2030-06-01T10:00:00",
            "category": "MENTAL_RESET"
        }))
        .expect("event with new category must parse");
        assert_eq!(event.category.as_deref(), Some("MENTAL_RESET"));
        assert!(!KNOWN_CATEGORIES.contains(&"MENTAL_RESET"));
    }

    #[test]
    fn create_requests_enforce_the_strict_start_format() {
        let request: CreateEventRequest = serde_json::from_value(json!({
            "start_date_local": "2030-06-01T10:00:00",
            "name": "Tempo"
        }))
        .expect("request must parse");
        assert!(request.start().is_ok());

        let sloppy: CreateEventRequest =
            serde_json::from_value(json!({ "start_date_local": "2030-06-01T10:00" }))
                .expect("shape still parses, format check is separate");
        assert!(sloppy.start().is_err());
    }

    #[test]
    fn update_patches_send_exactly_the_supplied_fields() {
        let patch: UpdateEventRequest =
            serde_json::from_value(json!({ "name": "Renamed" })).expect("patch must parse");
        let body = serde_json::to_value(&patch).expect("patch must serialize");
        assert_eq!(body, json!({ "name": "Renamed" }));
    }

    #[test]
    fn empty_update_patches_are_legal() {
        let patch: UpdateEventRequest =
            serde_json::from_value(json!({})).expect("empty patch must parse");
        assert_eq!(patch.start().expect("no start to check"), None);
        assert_eq!(serde_json::to_value(&patch).expect("must serialize"), json!({}));
    }

    #[test]
    fn update_patches_check_the_start_format_when_present() {
        let patch: UpdateEventRequest =
            serde_json::from_value(json!({ "start_date_local": "next tuesday" }))
                .expect("shape still parses");
        assert!(patch.start().is_err());
    }
}
