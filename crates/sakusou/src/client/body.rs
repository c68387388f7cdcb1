//! Request body helpers: key re-casing, default merging and the empty marker

use sakusou_core::{KeyCase, str_to_camel_case, str_to_snake_case};
use serde_json::{Map, Value};

/// Marker key of the empty-body sentinel
const EMPTY_MARKER: &str = "request";

/// The sentinel body meaning "send no body at all".
///
/// Endpoint code that builds bodies from defaults can pass this value through
/// [`ClientCore::dispatch_request`](crate::client::ClientCore::dispatch_request)
/// to suppress the body entirely.
pub fn empty_body() -> Value {
    let mut marker = Map::new();
    marker.insert(EMPTY_MARKER.to_string(), Value::Null);
    Value::Object(marker)
}

/// Whether `body` is the [`empty_body`] sentinel.
pub fn is_empty_body(body: &Value) -> bool {
    match body.as_object() {
        Some(map) => map.len() == 1 && map.get(EMPTY_MARKER) == Some(&Value::Null),
        None => false,
    }
}

/// Rewrite every key containing `_` to camelCase; other keys are kept as-is.
pub fn convert_to_camel_case_keys(body: &Map<String, Value>) -> Map<String, Value> {
    body.iter()
        .map(|(key, value)| {
            let key = if key.contains('_') {
                str_to_camel_case(key)
            } else {
                key.clone()
            };
            (key, value.clone())
        })
        .collect()
}

/// Rewrite every key to snake_case.
pub fn convert_to_snake_case_keys(body: &Map<String, Value>) -> Map<String, Value> {
    body.iter()
        .map(|(key, value)| (str_to_snake_case(key), value.clone()))
        .collect()
}

/// Rewrite every key to `case`.
pub fn convert_keys(body: &Map<String, Value>, case: KeyCase) -> Map<String, Value> {
    match case {
        KeyCase::Camel => convert_to_camel_case_keys(body),
        KeyCase::Snake => convert_to_snake_case_keys(body),
    }
}

/// Merge caller-supplied `properties` over `defaults`.
///
/// The result holds exactly the keys of `defaults`, in their order. A key
/// present in `properties` wins even when its value is `null`; keys only
/// present in `properties` are dropped.
pub fn merge_with_defaults(
    properties: &Map<String, Value>,
    defaults: &Map<String, Value>,
) -> Map<String, Value> {
    defaults
        .iter()
        .map(|(key, default)| {
            let value = properties.get(key).unwrap_or(default);
            (key.clone(), value.clone())
        })
        .collect()
}

/// Flatten a JSON body into multipart text fields.
///
/// Strings are sent raw, `null` values are skipped, arrays contribute one
/// field per element, and everything else is sent as its JSON text. Bodies
/// that are not objects contribute no fields.
pub(crate) fn form_fields(body: Option<&Value>) -> Vec<(String, String)> {
    let Some(map) = body.and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut fields = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = field_text(item) {
                        fields.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = field_text(other) {
                    fields.push((key.clone(), text));
                }
            }
        }
    }
    fields
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_camel_case_keys() {
        let body = map(json!({"user_id": 1, "name": "x"}));
        assert_eq!(
            Value::Object(convert_to_camel_case_keys(&body)),
            json!({"userId": 1, "name": "x"})
        );
    }

    #[test]
    fn test_camel_case_leaves_mixed_case_without_underscore() {
        let body = map(json!({"createdAt": 1, "ID": 2}));
        let converted = convert_to_camel_case_keys(&body);
        assert!(converted.contains_key("createdAt"));
        assert!(converted.contains_key("ID"));
    }

    #[test]
    fn test_snake_case_keys() {
        let body = map(json!({"userId": 1, "name": "x", "createdAtUtc": null}));
        assert_eq!(
            Value::Object(convert_to_snake_case_keys(&body)),
            json!({"user_id": 1, "name": "x", "created_at_utc": null})
        );
    }

    #[test]
    fn test_convert_keys_dispatches_on_case() {
        let body = map(json!({"first_name": "a"}));
        assert!(convert_keys(&body, KeyCase::Camel).contains_key("firstName"));
        let body = map(json!({"firstName": "a"}));
        assert!(convert_keys(&body, KeyCase::Snake).contains_key("first_name"));
    }

    #[test]
    fn test_merge_with_defaults() {
        let defaults = map(json!({"name": "default", "age": 20, "email": null}));
        let properties = map(json!({"age": 31, "email": null, "unknown": true}));

        let merged = merge_with_defaults(&properties, &defaults);
        assert_eq!(
            Value::Object(merged.clone()),
            json!({"name": "default", "age": 31, "email": null})
        );
        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["name", "age", "email"]
        );
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(is_empty_body(&empty_body()));
        assert!(!is_empty_body(&json!({"request": 1})));
        assert!(!is_empty_body(&json!({"request": null, "other": 1})));
        assert!(!is_empty_body(&json!({})));
        assert!(!is_empty_body(&Value::Null));
    }

    #[test]
    fn test_form_fields() {
        let body = json!({
            "title": "avatar",
            "count": 3,
            "public": true,
            "tags": ["a", 2],
            "skip": null,
        });
        assert_eq!(
            form_fields(Some(&body)),
            vec![
                ("title".to_string(), "avatar".to_string()),
                ("count".to_string(), "3".to_string()),
                ("public".to_string(), "true".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "2".to_string()),
            ]
        );
        assert!(form_fields(None).is_empty());
        assert!(form_fields(Some(&json!([1, 2]))).is_empty());
    }

    fn arb_plain_keys() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Z][a-zA-Z0-9]{0,10}", 0..8)
    }

    proptest! {
        /// Keys without underscores are untouched by camel conversion
        #[test]
        fn prop_camel_identity_without_underscores(keys in arb_plain_keys()) {
            let body: Map<String, Value> =
                keys.iter().map(|k| (k.clone(), Value::from(k.len()))).collect();
            prop_assert_eq!(convert_to_camel_case_keys(&body), body);
        }

        /// Merged bodies always carry exactly the defaults' key set
        #[test]
        fn prop_merge_key_set_equals_defaults(
            default_keys in prop::collection::btree_set("[a-z_]{1,8}", 0..8),
            property_keys in prop::collection::btree_set("[a-z_]{1,8}", 0..8),
        ) {
            let defaults: Map<String, Value> =
                default_keys.iter().map(|k| (k.clone(), json!("default"))).collect();
            let properties: Map<String, Value> =
                property_keys.iter().map(|k| (k.clone(), json!("given"))).collect();

            let merged = merge_with_defaults(&properties, &defaults);
            let merged_keys: std::collections::BTreeSet<_> = merged.keys().cloned().collect();
            prop_assert_eq!(&merged_keys, &default_keys);

            for (key, value) in &merged {
                let expected = if property_keys.contains(key) { "given" } else { "default" };
                prop_assert_eq!(value, &json!(expected));
            }
        }
    }
}
