use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workout in the athlete's library. The description holds the
/// intervals.icu builder-syntax step text, not prose.
#[derive(Debug, Serialize, Deserialize)]
pub struct Workout {
    /// Absent until intervals.icu has assigned one
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    /// Library folder the workout lives in
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub folder_id: Option<i64>,
    pub name: String,
    /// Workout steps in builder syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sport (Ride, Run, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,
    /// Meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Estimated duration in seconds
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub moving_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Undeclared upstream fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input for adding a workout to the library. Same shape as [`Workout`]
/// minus the id; only supplied fields go on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requests_only_send_supplied_fields() {
        let request = CreateWorkoutRequest {
            name: "Threshold Intervals".to_string(),
            description: Some("5x\n- 3m Z5\n- 3m Z1".to_string()),
            folder_id: None,
            sport_type: Some("Ride".to_string()),
            indoor: None,
            distance: None,
            moving_time: None,
            tags: None,
        };
        let body = serde_json::to_value(&request).expect("request must serialize");
        assert_eq!(
            body,
            json!({
                "name": "Threshold Intervals",
                "description": "5x\n- 3m Z5\n- 3m Z1",
                "type": "Ride"
            })
        );
    }

    #[test]
    fn workouts_without_an_id_parse() {
        let workout: Workout = serde_json::from_value(json!({
            "name": "Easy Run",
            "type": "Run",
            "tags": ["base", "recovery"]
        }))
        .expect("workout must parse");
        assert_eq!(workout.id, None);
        assert_eq!(workout.tags.as_deref(), Some(&["base".to_string(), "recovery".to_string()][..]));
    }

    #[test]
    fn a_workout_needs_a_name() {
        let result: Result<Workout, _> = serde_json::from_value(json!({ "id": 12 }));
        assert!(result.is_err(), "workout without a name must fail");
    }
}
