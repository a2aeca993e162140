//! Query-string encoding for GET and DELETE params.
//!
//! Uses `application/x-www-form-urlencoded` (space becomes `+`). Nested
//! values flatten into bracketed keys: objects as `outer[inner]`, arrays as
//! `list[0]`. Booleans encode as `1`/`0` and `null` entries are dropped.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Encode `params` as a query string, without the leading `?`.
pub fn build_query(params: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        append_value(&mut serializer, key, value);
    }
    serializer.finish()
}

fn append_value(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            serializer.append_pair(key, if *b { "1" } else { "0" });
        }
        Value::Number(n) => {
            serializer.append_pair(key, &n.to_string());
        }
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                append_value(serializer, &format!("{key}[{i}]"), item);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                append_value(serializer, &format!("{key}[{name}]"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_params_encode_to_empty_string() {
        assert_eq!(build_query(&Map::new()), "");
    }

    #[test]
    fn scalars_are_form_encoded() {
        let q = build_query(&params(json!({"q": "red shirt", "limit": 10})));
        assert_eq!(q, "limit=10&q=red+shirt");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let q = build_query(&params(json!({"email": "a+b@example.com"})));
        assert_eq!(q, "email=a%2Bb%40example.com");
    }

    #[test]
    fn booleans_and_nulls() {
        let q = build_query(&params(json!({"active": true, "archived": false, "note": null})));
        assert_eq!(q, "active=1&archived=0");
    }

    #[test]
    fn nested_values_use_bracketed_keys() {
        let q = build_query(&params(json!({
            "ids": [3, 4],
            "filter": {"size": "M"}
        })));
        assert_eq!(q, "filter%5Bsize%5D=M&ids%5B0%5D=3&ids%5B1%5D=4");
    }
}
