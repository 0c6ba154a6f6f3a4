//! Shape-tolerant decoding of list responses
//!
//! The backend is inconsistent about list payloads: some endpoints return a
//! bare array, others wrap it as `{ "users": [...] }` or `{ "data": [...] }`.
//! Everything list-shaped goes through [`unwrap_list`] so callers only ever
//! see a `Vec`.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Wrapper keys accepted by default, in lookup order
pub const DEFAULT_LIST_KEYS: &[&str] = &["users", "data"];

/// Extract the list carried by `value`.
///
/// Accepts a bare array, or an object whose first matching key in `keys`
/// holds an array. Any other shape yields an empty list.
pub fn list_items(value: Value, keys: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in keys {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Decode a list response into `T`, skipping elements that do not decode.
pub fn unwrap_list_with<T: DeserializeOwned>(value: Value, keys: &[&str]) -> Vec<T> {
    list_items(value, keys)
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("skipping undecodable list element {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// [`unwrap_list_with`] using [`DEFAULT_LIST_KEYS`]
pub fn unwrap_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    unwrap_list_with(value, DEFAULT_LIST_KEYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn bare_array() {
        let rows: Vec<Row> = unwrap_list(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn wrapped_in_users_or_data() {
        let rows: Vec<Row> = unwrap_list(json!({ "users": [{ "id": 3 }] }));
        assert_eq!(rows, vec![Row { id: 3 }]);

        let rows: Vec<Row> = unwrap_list(json!({ "data": [{ "id": 4 }], "total": 1 }));
        assert_eq!(rows, vec![Row { id: 4 }]);
    }

    #[test]
    fn unknown_shapes_are_empty() {
        assert!(unwrap_list::<Row>(json!({ "items": [{ "id": 1 }] })).is_empty());
        assert!(unwrap_list::<Row>(json!({ "data": { "id": 1 } })).is_empty());
        assert!(unwrap_list::<Row>(json!("nope")).is_empty());
        assert!(unwrap_list::<Row>(Value::Null).is_empty());
    }

    #[test]
    fn wrapper_key_that_is_not_an_array_falls_through() {
        let rows: Vec<Row> = unwrap_list(json!({ "users": null, "data": [{ "id": 9 }] }));
        assert_eq!(rows, vec![Row { id: 9 }]);
    }

    #[test]
    fn custom_keys() {
        let rows: Vec<Row> = unwrap_list_with(json!({ "cases": [{ "id": 5 }] }), &["cases"]);
        assert_eq!(rows, vec![Row { id: 5 }]);
    }

    #[test]
    fn bad_elements_are_skipped() {
        let rows: Vec<Row> = unwrap_list(json!([{ "id": 1 }, { "id": "x" }, { "id": 3 }]));
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 3 }]);
    }
}
