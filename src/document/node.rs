//! JSON value representation for treequill documents.
//!
//! A document is always a [`JsonObject`] at the root. Values nested below it may
//! be any member of [`JsonValue`]. Objects keep insertion order for display, but
//! equality between objects ignores order (it is `IndexMap` equality).
//!
//! # Example
//!
//! ```
//! use treequill::document::node::{JsonNumber, JsonObject, JsonValue};
//!
//! let mut doc = JsonObject::new();
//! doc.insert("name".to_string(), JsonValue::String("Alice".to_string()));
//! doc.insert("age".to_string(), JsonValue::Number(JsonNumber::Integer(30)));
//!
//! assert_eq!(doc.len(), 2);
//! assert!(doc["name"].is_string());
//! ```

use indexmap::IndexMap;

/// An ordered mapping from key to value. Keys are unique within one object.
pub type JsonObject = IndexMap<String, JsonValue>;

/// Represents JSON numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonNumber::Integer(i) => write!(f, "{}", i),
            JsonNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl JsonNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Integer(i) => *i as f64,
            JsonNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonNumber::Integer(_))
    }
}

/// A JSON value.
///
/// Trees of `JsonValue` are acyclic by construction: every child is owned by
/// exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A keyed mapping
    Object(JsonObject),
    /// An ordered list of values
    Array(Vec<JsonValue>),
    String(String),
    Number(JsonNumber),
    Boolean(bool),
    Null,
}

impl JsonValue {
    /// Returns true if this value is an object.
    ///
    /// ```
    /// use treequill::document::node::{JsonObject, JsonValue};
    ///
    /// assert!(JsonValue::Object(JsonObject::new()).is_object());
    /// assert!(!JsonValue::Null.is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns the inner object, if this value is one.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Consumes the value and returns the inner object, if it is one.
    pub fn into_object(self) -> Option<JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number of nested objects and arrays, counting this value.
    ///
    /// Scalars are 0, `{}` and `[]` are 1, `{"a": [1]}` is 2.
    pub fn nesting_depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((value, depth)) = pending.pop() {
            match value {
                JsonValue::Object(map) => {
                    deepest = deepest.max(depth + 1);
                    pending.extend(map.values().map(|child| (child, depth + 1)));
                }
                JsonValue::Array(items) => {
                    deepest = deepest.max(depth + 1);
                    pending.extend(items.iter().map(|child| (child, depth + 1)));
                }
                _ => {}
            }
        }
        deepest
    }

    /// Short type name used in messages and listings.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
        }
    }
}

impl From<JsonObject> for JsonValue {
    fn from(map: JsonObject) -> Self {
        JsonValue::Object(map)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(JsonNumber::Integer(n))
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(JsonNumber::Float(n))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

/// The document a fresh session starts with when no stored document exists.
pub fn default_document() -> JsonObject {
    let mut name = JsonObject::new();
    name.insert("bn".to_string(), "".into());
    name.insert("en".to_string(), "".into());

    let mut driver_types = JsonObject::new();
    driver_types.insert("auto".to_string(), true.into());
    driver_types.insert("img_url".to_string(), "".into());
    driver_types.insert("is_active".to_string(), true.into());
    driver_types.insert("is_open_for_signup".to_string(), true.into());
    driver_types.insert("name".to_string(), name.into());
    driver_types.insert("verify_otp_for_signup".to_string(), false.into());

    let mut auto = JsonObject::new();
    auto.insert("driver_types".to_string(), driver_types.into());

    let mut root = JsonObject::new();
    root.insert("auto".to_string(), auto.into());
    root
}
