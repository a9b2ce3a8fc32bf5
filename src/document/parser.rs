//! Conversion between text, `serde_json` values, and treequill documents.
//!
//! Two entry points take text from a user:
//!
//! - [`validate_import`] is strict: the text must be JSON and its top level an object.
//! - [`parse_lenient`] is forgiving: text that is not JSON is kept as a string.
//!
//! # Example
//!
//! ```
//! use treequill::document::node::JsonValue;
//! use treequill::document::parser::{parse_lenient, validate_import};
//!
//! assert_eq!(parse_lenient("2"), JsonValue::from(2i64));
//! assert_eq!(parse_lenient("hello"), JsonValue::from("hello"));
//!
//! let doc = validate_import(r#"{"a": {"b": 1}}"#).unwrap();
//! assert!(doc["a"].is_object());
//! assert!(validate_import("[1,2,3]").is_err());
//! ```

use super::node::{JsonNumber, JsonObject, JsonValue};
use crate::error::{EditError, Result};
use serde_json::Value as SerdeValue;

/// Converts a serde_json value into a treequill value.
///
/// Numbers that fit an `i64` become integers; all others become floats.
pub fn parse_value(value: &SerdeValue) -> JsonValue {
    match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(*b),
        SerdeValue::Number(n) => match n.as_i64() {
            Some(i) => JsonValue::Number(JsonNumber::Integer(i)),
            None => JsonValue::Number(JsonNumber::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        SerdeValue::String(s) => JsonValue::String(s.clone()),
        SerdeValue::Array(items) => JsonValue::Array(items.iter().map(parse_value).collect()),
        SerdeValue::Object(map) => JsonValue::Object(parse_object(map)),
    }
}

fn parse_object(map: &serde_json::Map<String, SerdeValue>) -> JsonObject {
    map.iter()
        .map(|(key, value)| (key.clone(), parse_value(value)))
        .collect()
}

impl From<&JsonValue> for SerdeValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => SerdeValue::Null,
            JsonValue::Boolean(b) => SerdeValue::Bool(*b),
            JsonValue::Number(JsonNumber::Integer(i)) => SerdeValue::Number((*i).into()),
            // NaN and infinities have no JSON spelling
            JsonValue::Number(JsonNumber::Float(f)) => serde_json::Number::from_f64(*f)
                .map(SerdeValue::Number)
                .unwrap_or(SerdeValue::Null),
            JsonValue::String(s) => SerdeValue::String(s.clone()),
            JsonValue::Array(items) => SerdeValue::Array(items.iter().map(SerdeValue::from).collect()),
            JsonValue::Object(map) => object_to_serde(map),
        }
    }
}

/// Converts a document into a serde_json object, keeping key order.
pub fn object_to_serde(map: &JsonObject) -> SerdeValue {
    SerdeValue::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), SerdeValue::from(value)))
            .collect(),
    )
}

/// Parses user-entered value text.
///
/// Text that parses as JSON becomes that value; anything else is kept
/// verbatim as a string. This never fails.
pub fn parse_lenient(raw: &str) -> JsonValue {
    match serde_json::from_str::<SerdeValue>(raw) {
        Ok(value) => parse_value(&value),
        Err(_) => JsonValue::String(raw.to_string()),
    }
}

/// Parses text that is to replace the whole document.
///
/// # Errors
///
/// Returns [`EditError::Parse`] when the text is not valid JSON or when its
/// top-level value is not an object.
pub fn validate_import(text: &str) -> Result<JsonObject> {
    let value: SerdeValue =
        serde_json::from_str(text).map_err(|e| EditError::Parse(format!("invalid JSON: {}", e)))?;
    match value {
        SerdeValue::Object(map) => Ok(parse_object(&map)),
        other => Err(EditError::Parse(format!(
            "top-level value must be an object, found {}",
            parse_value(&other).type_name()
        ))),
    }
}

/// Serializes a document with the given indentation width.
pub fn to_json_string(doc: &JsonObject, indent_size: usize) -> anyhow::Result<String> {
    use anyhow::Context;
    use serde::Serialize;

    let indent = " ".repeat(indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    object_to_serde(doc)
        .serialize(&mut serializer)
        .context("Failed to serialize document")?;
    String::from_utf8(out).context("Serialized document is not UTF-8")
}

/// Serializes any value on a single line.
pub fn to_compact_string(value: &JsonValue) -> String {
    SerdeValue::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_values() {
        assert_eq!(parse_lenient("true"), JsonValue::Boolean(true));
        assert_eq!(parse_lenient("null"), JsonValue::Null);
        assert_eq!(parse_lenient("1.5"), JsonValue::from(1.5));
        assert_eq!(parse_lenient("\"quoted\""), JsonValue::from("quoted"));
        assert_eq!(parse_lenient("{\"k\": [1]}").type_name(), "object");
    }

    #[test]
    fn test_parse_lenient_falls_back_to_string() {
        assert_eq!(parse_lenient(""), JsonValue::from(""));
        assert_eq!(parse_lenient("{broken"), JsonValue::from("{broken"));
        assert_eq!(parse_lenient("hello world"), JsonValue::from("hello world"));
    }

    #[test]
    fn test_validate_import_rejects_non_objects() {
        for text in ["[1,2,3]", "42", "\"s\"", "null", "not json", ""] {
            assert!(
                matches!(validate_import(text), Err(EditError::Parse(_))),
                "expected parse error for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_validate_import_keeps_key_order() {
        let doc = validate_import(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_large_numbers_become_floats() {
        assert_eq!(parse_lenient("18446744073709551615").type_name(), "number");
        assert!(matches!(
            parse_lenient("18446744073709551615"),
            JsonValue::Number(JsonNumber::Float(_))
        ));
    }

    #[test]
    fn test_to_json_string_indent() {
        let doc = validate_import(r#"{"a": {"b": 1}}"#).unwrap();
        let text = to_json_string(&doc, 4).unwrap();
        assert_eq!(text, "{\n    \"a\": {\n        \"b\": 1\n    }\n}");
        assert_eq!(validate_import(&text).unwrap(), doc);
    }
}
