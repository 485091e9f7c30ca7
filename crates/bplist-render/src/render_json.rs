use bplist_types::Value;
use serde_json::{Map, Number, Value as Json};

use crate::error::RenderError;

/// Key of the tagged object wrapping a date.
pub const DATE_KEY: &str = "$date";

/// Key of the tagged object wrapping a data blob.
pub const DATA_KEY: &str = "$data";

/// JSON renderer: maps a decoded [`Value`] onto `serde_json`'s data model.
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────┐
/// │ Value        │ JSON                                               │
/// ├──────────────┼────────────────────────────────────────────────────┤
/// │ Null         │ null                                               │
/// │ Bool         │ true / false                                       │
/// │ Int          │ number                                             │
/// │ Real         │ number (NaN and infinities become null)            │
/// │ Date         │ {"$date": seconds since 2001-01-01T00:00:00Z}      │
/// │ Data         │ {"$data": "<lowercase hex>"}                       │
/// │ String       │ string                                             │
/// │ Array        │ array                                              │
/// │ Dictionary   │ object if every key is a string, else [[k, v], ..] │
/// └──────────────┴────────────────────────────────────────────────────┘
/// ```
///
/// An object cannot hold duplicate keys, so when a string-keyed dictionary
/// repeats a key the later pair wins. Object members are emitted in
/// `serde_json`'s key order (sorted), not in plist order. UIDs are already
/// `{"CF$UID": n}` dictionaries and need no special case.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render `value` as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    pub fn render(value: &Value, pretty: bool) -> Result<String, RenderError> {
        let json = Self::to_json(value);
        let text = if pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(text)
    }

    /// Convert `value` to a `serde_json::Value` tree.
    pub fn to_json(value: &Value) -> Json {
        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::from(*n),
            Value::Real(r) => real(*r),
            Value::Date(secs) => tagged(DATE_KEY, real(*secs)),
            Value::Data(bytes) => tagged(DATA_KEY, Json::String(hex::encode(bytes))),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Value::Dictionary(pairs) => dictionary(pairs),
        }
    }
}

fn real(r: f64) -> Json {
    Number::from_f64(r).map_or(Json::Null, Json::Number)
}

fn tagged(key: &str, inner: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_owned(), inner);
    Json::Object(map)
}

fn dictionary(pairs: &[(Value, Value)]) -> Json {
    let keys: Option<Vec<&str>> = pairs.iter().map(|(key, _)| key.as_str()).collect();

    match keys {
        Some(keys) => {
            let mut map = Map::new();
            for (key, (_, value)) in keys.into_iter().zip(pairs) {
                map.insert(key.to_owned(), JsonRenderer::to_json(value));
            }
            Json::Object(map)
        }
        None => Json::Array(
            pairs
                .iter()
                .map(|(key, value)| {
                    Json::Array(vec![JsonRenderer::to_json(key), JsonRenderer::to_json(value)])
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert_eq!(JsonRenderer::to_json(&Value::Null), json!(null));
        assert_eq!(JsonRenderer::to_json(&Value::Bool(true)), json!(true));
        assert_eq!(JsonRenderer::to_json(&Value::Int(-7)), json!(-7));
        assert_eq!(JsonRenderer::to_json(&Value::Real(1.5)), json!(1.5));
        assert_eq!(JsonRenderer::to_json(&Value::from("cat")), json!("cat"));
    }

    #[test]
    fn non_finite_reals_become_null() {
        assert_eq!(JsonRenderer::to_json(&Value::Real(f64::NAN)), json!(null));
        assert_eq!(
            JsonRenderer::to_json(&Value::Real(f64::INFINITY)),
            json!(null)
        );
        assert_eq!(
            JsonRenderer::to_json(&Value::Date(f64::NEG_INFINITY)),
            json!({ "$date": null })
        );
    }

    #[test]
    fn dates_and_data_are_tagged() {
        assert_eq!(
            JsonRenderer::to_json(&Value::Date(-86_400.0)),
            json!({ "$date": -86_400.0 })
        );
        assert_eq!(
            JsonRenderer::to_json(&Value::Data(vec![0xDE, 0xAD, 0x00])),
            json!({ "$data": "dead00" })
        );
    }

    #[test]
    fn string_keyed_dictionary_is_object() {
        let value = Value::Dictionary(vec![
            (Value::from("b"), Value::Int(1)),
            (Value::from("a"), Value::Array(vec![Value::Null])),
        ]);
        assert_eq!(
            JsonRenderer::to_json(&value),
            json!({ "a": [null], "b": 1 })
        );
    }

    #[test]
    fn later_duplicate_wins() {
        let value = Value::Dictionary(vec![
            (Value::from("k"), Value::Int(1)),
            (Value::from("k"), Value::Int(2)),
        ]);
        assert_eq!(JsonRenderer::to_json(&value), json!({ "k": 2 }));
    }

    #[test]
    fn non_string_keys_become_pair_list() {
        let value = Value::Dictionary(vec![
            (Value::from("k"), Value::Null),
            (Value::Int(9), Value::Bool(false)),
        ]);
        assert_eq!(
            JsonRenderer::to_json(&value),
            json!([["k", null], [9, false]])
        );
    }

    #[test]
    fn empty_dictionary_is_empty_object() {
        assert_eq!(
            JsonRenderer::to_json(&Value::Dictionary(vec![])),
            json!({})
        );
    }

    #[test]
    fn uid_keeps_its_shape() {
        assert_eq!(
            JsonRenderer::to_json(&Value::uid(7)),
            json!({ "CF$UID": 7 })
        );
    }

    #[test]
    fn compact_and_pretty() {
        let value = Value::Dictionary(vec![(Value::from("a"), Value::Int(1))]);
        assert_eq!(JsonRenderer::render(&value, false).unwrap(), r#"{"a":1}"#);
        assert_eq!(
            JsonRenderer::render(&value, true).unwrap(),
            "{\n  \"a\": 1\n}"
        );
    }
}
