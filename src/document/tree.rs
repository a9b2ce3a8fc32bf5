//! Key-path navigation over documents.
//!
//! These functions never modify their input. `set` and `delete` return a new
//! document; the caller decides whether it replaces the old one. All three walk
//! the path in a loop rather than recursing, and refuse paths longer than
//! [`MAX_PATH_DEPTH`]. `set` also refuses to build a document nested deeper
//! than that, since it could not be read back.
//!
//! # Example
//!
//! ```
//! use treequill::document::node::{JsonObject, JsonValue};
//! use treequill::document::path::Path;
//! use treequill::document::tree::{delete, get, set};
//!
//! let doc = JsonObject::new();
//! let path = Path::new(["user", "name"]);
//!
//! // Missing intermediate objects are created on the way down
//! let doc = set(&doc, &path, JsonValue::from("Alice")).unwrap();
//! assert_eq!(get(&doc, &path).unwrap(), JsonValue::from("Alice"));
//!
//! let doc = delete(&doc, &path).unwrap();
//! assert!(get(&doc, &path).is_none());
//! assert!(get(&doc, &Path::new(["user"])).is_some());
//! ```

use super::node::{JsonObject, JsonValue};
use super::path::{Path, MAX_PATH_DEPTH};
use crate::error::PathError;

/// A borrowed location in a document: the root object or a value below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Root(&'a JsonObject),
    Value(&'a JsonValue),
}

impl<'a> NodeRef<'a> {
    /// Returns the object at this location, if it is one.
    pub fn as_object(&self) -> Option<&'a JsonObject> {
        match self {
            NodeRef::Root(map) => Some(map),
            NodeRef::Value(value) => value.as_object(),
        }
    }

    /// Returns the value at this location, or `None` for the root.
    pub fn as_value(&self) -> Option<&'a JsonValue> {
        match self {
            NodeRef::Root(_) => None,
            NodeRef::Value(value) => Some(value),
        }
    }

    /// Clones the location into an owned value.
    pub fn to_value(&self) -> JsonValue {
        match self {
            NodeRef::Root(map) => JsonValue::Object((*map).clone()),
            NodeRef::Value(value) => (*value).clone(),
        }
    }
}

impl PartialEq<JsonValue> for NodeRef<'_> {
    fn eq(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (NodeRef::Root(map), JsonValue::Object(other)) => *map == other,
            (NodeRef::Root(_), _) => false,
            (NodeRef::Value(value), other) => *value == other,
        }
    }
}

fn check_depth(depth: usize) -> Result<(), PathError> {
    if depth > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep {
            depth,
            limit: MAX_PATH_DEPTH,
        });
    }
    Ok(())
}

/// Walks `segments` from `root`, requiring an object at every step.
pub fn object_at<'a>(root: &'a JsonObject, segments: &[String]) -> Option<&'a JsonObject> {
    let mut current = root;
    for key in segments {
        current = current.get(key)?.as_object()?;
    }
    Some(current)
}

fn object_at_mut<'a>(root: &'a mut JsonObject, segments: &[String]) -> Option<&'a mut JsonObject> {
    let mut current = root;
    for key in segments {
        current = match current.get_mut(key)? {
            JsonValue::Object(map) => map,
            _ => return None,
        };
    }
    Some(current)
}

/// Turns `slot` into an object unless it already is one.
fn ensure_object(slot: &mut JsonValue) -> &mut JsonObject {
    if !slot.is_object() {
        *slot = JsonValue::Object(JsonObject::new());
    }
    match slot {
        JsonValue::Object(map) => map,
        _ => unreachable!("slot was just replaced with an object"),
    }
}

/// Returns the location addressed by `path`.
///
/// `None` when a key is missing, when a non-final segment addresses something
/// other than an object, or when the path exceeds [`MAX_PATH_DEPTH`].
pub fn get<'a>(doc: &'a JsonObject, path: &Path) -> Option<NodeRef<'a>> {
    if path.len() > MAX_PATH_DEPTH {
        return None;
    }
    match path.segments().split_last() {
        None => Some(NodeRef::Root(doc)),
        Some((last, parents)) => object_at(doc, parents)?.get(last).map(NodeRef::Value),
    }
}

/// Returns a copy of `doc` with `value` stored at `path`.
///
/// Missing intermediate keys, and intermediate values that are not objects,
/// become empty objects. An existing final key keeps its position. With the
/// empty path, `value` becomes the whole document and must be an object.
///
/// Fails with [`PathError::TooDeep`] when the path length plus the nesting of
/// `value` exceeds [`MAX_PATH_DEPTH`]; the root object is one level and every
/// intermediate key adds another.
pub fn set(doc: &JsonObject, path: &Path, value: JsonValue) -> Result<JsonObject, PathError> {
    check_depth(path.len() + value.nesting_depth())?;
    let Some((last, parents)) = path.segments().split_last() else {
        return value.into_object().ok_or(PathError::RootNotObject);
    };

    let mut root = doc.clone();
    let mut current = &mut root;
    for key in parents {
        let slot = current
            .entry(key.clone())
            .or_insert_with(|| JsonValue::Object(JsonObject::new()));
        current = ensure_object(slot);
    }
    current.insert(last.clone(), value);
    Ok(root)
}

/// Returns a copy of `doc` without the key at the end of `path`.
///
/// Sibling keys keep their order. Fails when the path is empty, when the
/// parent is missing or not an object, or when the key is absent.
pub fn delete(doc: &JsonObject, path: &Path) -> Result<JsonObject, PathError> {
    check_depth(path.len())?;
    let (last, parents) = path
        .segments()
        .split_last()
        .ok_or(PathError::EmptyPath)?;

    let present = object_at(doc, parents).is_some_and(|parent| parent.contains_key(last));
    if !present {
        return Err(PathError::NotFound(path.to_string()));
    }

    let mut root = doc.clone();
    if let Some(parent) = object_at_mut(&mut root, parents) {
        parent.shift_remove(last);
    }
    Ok(root)
}
