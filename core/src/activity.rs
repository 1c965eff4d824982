use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recorded activity. Read-only; intervals.icu owns these, we only look.
///
/// Every metric is optional. Which ones are present depends on the sport,
/// the recording device and whether the athlete has a power meter, so a
/// missing value is normal, not an error. Integer metrics may arrive
/// float-shaped (`147.0`) and collapse to the integer they are; a value of
/// the wrong type is an error: that means the upstream contract moved and
/// we want to hear about it, not paper over it.
#[derive(Debug, Serialize, Deserialize)]
pub struct Activity {
    /// Activity identifier (e.g. "i49575791")
    pub id: String,
    /// Start of the activity in athlete-local time, `YYYY-MM-DDTHH:mm:ss`
    pub start_date_local: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sport (Ride, Run, ...). Null on hidden/stub records.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    /// Meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Seconds
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub moving_time: Option<i64>,
    /// Seconds
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub elapsed_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_elevation_gain: Option<f64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_heartrate: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_heartrate: Option<i64>,
    /// Meters per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<f64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_watts: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub weighted_average_watts: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub normalized_power: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilojoules: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where the recording came from (GARMIN_CONNECT, STRAVA, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commute: Option<bool>,
    /// Undeclared upstream fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
