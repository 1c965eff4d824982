use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The configured athlete as intervals.icu reports them. Read-only from
/// this side; only the id is guaranteed, everything else depends on what
/// the athlete filled in.
#[derive(Debug, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Athlete identifier (e.g. "i12345")
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// IANA timezone name the athlete's local timestamps are anchored to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_medium: Option<String>,
    /// Whatever intervals.icu sends beyond the declared fields, carried
    /// through untouched so upstream additions never break reads.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_the_id_is_required() {
        let profile: AthleteProfile =
            serde_json::from_value(json!({ "id": "i12345" })).expect("bare profile must parse");
        assert_eq!(profile.id, "i12345");
        assert_eq!(profile.name, None);
        assert!(profile.extra.is_empty());
    }

    #[test]
    fn null_and_absent_fields_collapse_to_none() {
        let profile: AthleteProfile = serde_json::from_value(json!({
            "id": "i12345",
            "city": null,
            "country": "NL"
        }))
        .expect("profile must parse");
        assert_eq!(profile.city, None);
        assert_eq!(profile.country.as_deref(), Some("NL"));
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let profile: AthleteProfile = serde_json::from_value(json!({
            "id": "i12345",
            "icu_weight": 71.5
        }))
        .expect("profile must parse");
        assert_eq!(profile.extra.get("icu_weight"), Some(&json!(71.5)));
    }
}
