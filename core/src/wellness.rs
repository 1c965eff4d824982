use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One day of wellness data. The id is the calendar date itself.
///
/// intervals.icu mixes naming styles here (camelCase metrics next to
/// snake_case everywhere else), so the wire names are pinned per field.
/// Subjective scores (fatigue, stress, mood, ...) are small integers the
/// athlete taps in; physiological ones come from whatever device syncs.
#[derive(Debug, Serialize, Deserialize)]
pub struct WellnessEntry {
    /// The day this entry describes, `YYYY-MM-DD`
    pub id: String,
    /// Last-modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(
        rename = "restingHR",
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub resting_hr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrv: Option<f64>,
    #[serde(
        rename = "sleepSecs",
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_secs: Option<i64>,
    #[serde(rename = "sleepScore", skip_serializing_if = "Option::is_none")]
    pub sleep_score: Option<f64>,
    #[serde(
        rename = "sleepQuality",
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_quality: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub fatigue: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub stress: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub mood: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub motivation: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub injury: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::num::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub soreness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Chronic training load (fitness)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctl: Option<f64>,
    /// Acute training load (fatigue)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atl: Option<f64>,
    #[serde(rename = "rampRate", skip_serializing_if = "Option::is_none")]
    pub ramp_rate: Option<f64>,
    /// Undeclared upstream fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camel_case_wire_names_map_to_snake_case_fields() {
        let entry: WellnessEntry = serde_json::from_value(json!({
            "id": "2024-03-01",
            "restingHR": 47,
            "sleepSecs": 27360,
            "rampRate": 1.2
        }))
        .expect("entry must parse");
        assert_eq!(entry.resting_hr, Some(47));
        assert_eq!(entry.sleep_secs, Some(27360));
        assert_eq!(entry.ramp_rate, Some(1.2));

        let back = serde_json::to_value(&entry).expect("entry must serialize");
        assert_eq!(back.get("restingHR"), Some(&json!(47)));
        assert!(back.get("resting_hr").is_none());
    }

    #[test]
    fn a_day_with_only_an_id_is_valid() {
        let entry: WellnessEntry =
            serde_json::from_value(json!({ "id": "2024-03-01" })).expect("entry must parse");
        assert_eq!(entry.id, "2024-03-01");
        assert_eq!(entry.weight, None);
    }

    #[test]
    fn float_shaped_scores_collapse_to_integers() {
        let entry: WellnessEntry = serde_json::from_value(json!({
            "id": "2024-03-01",
            "restingHR": 47.0,
            "fatigue": 2.0
        }))
        .expect("entry must parse");
        assert_eq!(entry.resting_hr, Some(47));
        assert_eq!(entry.fatigue, Some(2));
    }

    #[test]
    fn explicit_nulls_collapse_like_absence() {
        let entry: WellnessEntry = serde_json::from_value(json!({
            "id": "2024-03-01",
            "hrv": null,
            "fatigue": 2
        }))
        .expect("entry must parse");
        assert_eq!(entry.hrv, None);
        assert_eq!(entry.fatigue, Some(2));
    }
}
