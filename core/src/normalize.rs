use serde_json::Value;

/// Recursively removes null-valued keys from JSON objects. intervals.icu
/// serializes every unset field as an explicit null, which roughly triples
/// the size of a payload an agent has to read.
///
/// The contract:
/// - object keys holding null (at any depth) are dropped
/// - array elements are never dropped; a null element stays null so that
///   positions keep their meaning
/// - scalars pass through untouched
/// - a top-level null has no representation at all, hence the `Option`
///
/// Running it twice is the same as running it once.
pub fn strip_nulls(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => Some(Value::Object(
            map.into_iter()
                .filter_map(|(key, inner)| strip_nulls(inner).map(|kept| (key, kept)))
                .collect(),
        )),
        Value::Array(items) => Some(Value::Array(
            items
                .into_iter()
                .map(|inner| strip_nulls(inner).unwrap_or(Value::Null))
                .collect(),
        )),
        scalar => Some(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn removes_null_valued_keys() {
        let input = json!({ "name": "Morning Ride", "pace": null, "distance": 40233.0 });
        let output = strip_nulls(input).expect("object must survive");
        assert_eq!(output, json!({ "name": "Morning Ride", "distance": 40233.0 }));
    }

    #[test]
    fn recurses_into_nested_objects() {
        let input = json!({
            "athlete": { "id": "i12345", "city": null, "profile": { "bio": null, "sex": "F" } },
            "icu_ignore_time": null
        });
        let output = strip_nulls(input).expect("object must survive");
        assert_eq!(
            output,
            json!({ "athlete": { "id": "i12345", "profile": { "sex": "F" } } })
        );
    }

    #[test]
    fn arrays_keep_null_placeholders() {
        let input = json!([1, null, { "a": null, "b": 2 }, [null]]);
        let output = strip_nulls(input).expect("array must survive");
        assert_eq!(output, json!([1, null, { "b": 2 }, [null]]));
    }

    #[test]
    fn top_level_null_has_no_representation() {
        assert_eq!(strip_nulls(Value::Null), None);
    }

    #[test]
    fn scalars_and_empty_containers_pass_through() {
        for value in [json!(0), json!(false), json!(""), json!({}), json!([])] {
            assert_eq!(strip_nulls(value.clone()), Some(value));
        }
    }

    #[test]
    fn objects_reduced_to_nothing_stay_empty_objects() {
        let input = json!({ "a": null, "b": null });
        assert_eq!(strip_nulls(input), Some(json!({})));
    }

    #[test]
    fn stripping_twice_is_stripping_once() {
        let input = json!({
            "id": 42,
            "gone": null,
            "days": [null, { "load": null, "sport": "Run" }],
            "nested": { "deep": { "x": null } }
        });
        let once = strip_nulls(input).expect("must survive");
        let twice = strip_nulls(once.clone()).expect("must survive");
        assert_eq!(once, twice);
    }
}
