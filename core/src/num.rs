//! Serde adapters for numbers the API emits loosely.

use serde::{Deserialize, Deserializer, de};
use serde_json::Number;

/// Integer fields on fetched payloads sometimes arrive float-shaped
/// (`147.0`): intervals.icu computes them server-side and does not promise
/// an integer rendering. A whole-valued float collapses to the integer it
/// is; anything fractional or non-numeric is still a type error.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(int) = number.as_i64() {
        return Ok(Some(int));
    }
    if let Some(float) = number.as_f64() {
        if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
            return Ok(Some(float as i64));
        }
    }
    Err(de::Error::custom(format!(
        "expected an integer, got {number}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Metrics {
        #[serde(default, deserialize_with = "lenient_i64")]
        watts: Option<i64>,
    }

    #[test]
    fn whole_floats_collapse_to_integers() {
        let metrics: Metrics =
            serde_json::from_value(json!({ "watts": 147.0 })).expect("must parse");
        assert_eq!(metrics.watts, Some(147));
    }

    #[test]
    fn plain_integers_pass_through() {
        let metrics: Metrics = serde_json::from_value(json!({ "watts": 147 })).expect("must parse");
        assert_eq!(metrics.watts, Some(147));
    }

    #[test]
    fn null_and_absence_stay_none() {
        let metrics: Metrics =
            serde_json::from_value(json!({ "watts": null })).expect("null must parse");
        assert_eq!(metrics.watts, None);
        let metrics: Metrics = serde_json::from_value(json!({})).expect("absence must parse");
        assert_eq!(metrics.watts, None);
    }

    #[test]
    fn fractional_values_are_still_rejected() {
        let result: Result<Metrics, _> = serde_json::from_value(json!({ "watts": 147.5 }));
        assert!(result.is_err(), "a fractional value is a type error");
    }

    #[test]
    fn strings_are_still_rejected() {
        let result: Result<Metrics, _> = serde_json::from_value(json!({ "watts": "147" }));
        assert!(result.is_err(), "a numeric string is a type error");
    }
}
