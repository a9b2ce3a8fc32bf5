//! The editing engine.
//!
//! [`Engine`] owns the current document and its undo history. Every committing
//! operation computes a new document with the pure functions in
//! [`crate::document::tree`], pushes the previous document onto the history,
//! makes the new one current, and hands it to the attached store (if any).
//! The new document is returned to the caller as the change notification.
//!
//! A failed operation changes nothing: document, history and store are left as
//! they were.
//!
//! # Example
//!
//! ```
//! use treequill::document::node::{JsonObject, JsonValue};
//! use treequill::document::path::Path;
//! use treequill::editor::engine::Engine;
//!
//! let mut engine = Engine::new(JsonObject::new());
//! engine.add_property(&Path::root(), "count", "2").unwrap();
//! assert_eq!(engine.get(&Path::new(["count"])).unwrap(), JsonValue::from(2i64));
//!
//! engine.undo();
//! assert!(engine.document().is_empty());
//! ```

use crate::document::node::{default_document, JsonObject};
use crate::document::parser::{parse_lenient, validate_import};
use crate::document::path::Path;
use crate::document::tree::{self, NodeRef};
use crate::editor::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::error::{EditError, PathError, Result};
use crate::file::store::DocumentStore;
use tracing::{debug, info, warn};

/// Stateful editor for a single document.
pub struct Engine {
    document: JsonObject,
    history: History,
    store: Option<Box<dyn DocumentStore>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("document", &self.document)
            .field("history", &self.history)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

impl Engine {
    /// Creates an engine editing `document`, with no store attached.
    pub fn new(document: JsonObject) -> Self {
        Self {
            document,
            history: History::new(DEFAULT_HISTORY_LIMIT),
            store: None,
        }
    }

    /// Creates an engine whose initial document comes from `store`.
    ///
    /// When the store has nothing, or fails to load, the engine starts from
    /// [`default_document`]. The store then receives every committed document.
    pub fn with_store(mut store: impl DocumentStore + 'static) -> Self {
        let document = match store.load() {
            Ok(Some(doc)) => {
                info!(keys = doc.len(), "loaded stored document");
                doc
            }
            Ok(None) => {
                info!("no stored document, starting from default");
                default_document()
            }
            Err(e) => {
                warn!("failed to load stored document, starting from default: {:#}", e);
                default_document()
            }
        };
        Self {
            document,
            history: History::new(DEFAULT_HISTORY_LIMIT),
            store: Some(Box::new(store)),
        }
    }

    /// Replaces the history with an empty one holding at most `limit` snapshots.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::new(limit);
        self
    }

    /// The current document.
    pub fn document(&self) -> &JsonObject {
        &self.document
    }

    /// Reads the value at `path` in the current document.
    pub fn get(&self, path: &Path) -> Option<NodeRef<'_>> {
        tree::get(&self.document, path)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_limit(&self) -> usize {
        self.history.limit()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Replaces the whole document with parsed `text`.
    ///
    /// # Errors
    ///
    /// [`EditError::Parse`] when `text` is not JSON or not a JSON object.
    pub fn replace_document(&mut self, text: &str) -> Result<&JsonObject> {
        let doc = validate_import(text)?;
        info!(keys = doc.len(), "importing document");
        Ok(self.commit(doc))
    }

    /// Replaces the whole document with an already parsed object.
    ///
    /// # Errors
    ///
    /// [`EditError::Path`] when `doc` nests deeper than a saved file can be read.
    pub fn replace_with(&mut self, doc: JsonObject) -> Result<&JsonObject> {
        let doc = tree::set(&self.document, &Path::root(), doc.into())?;
        Ok(self.commit(doc))
    }

    /// Adds `key` to the object at `parent`, with `raw_value` parsed leniently.
    ///
    /// A parent that is missing or not an object (null, a scalar, an array) is
    /// replaced by an object holding just the new key. An existing key is
    /// overwritten in place. The key is stored as given; only its trimmed
    /// form must be non-empty.
    ///
    /// # Errors
    ///
    /// - [`EditError::Validation`] when `key` is blank
    /// - [`EditError::Path`] when the result would nest too deep to reload
    pub fn add_property(&mut self, parent: &Path, key: &str, raw_value: &str) -> Result<&JsonObject> {
        if key.trim().is_empty() {
            return Err(EditError::Validation("name cannot be empty".to_string()));
        }

        let mut merged = tree::get(&self.document, parent)
            .and_then(|node| node.as_object())
            .cloned()
            .unwrap_or_default();
        merged.insert(key.to_string(), parse_lenient(raw_value));

        let doc = tree::set(&self.document, parent, merged.into())?;
        debug!(parent = %parent, key, "added property");
        Ok(self.commit(doc))
    }

    /// Renames the key at the end of `path` to `new_key`.
    ///
    /// The renamed entry moves to the end of its parent's key order. Renaming
    /// onto an existing sibling replaces that sibling's value.
    ///
    /// # Errors
    ///
    /// - [`EditError::Validation`] when `new_key` is blank or `path` is the root
    /// - [`EditError::Path`] when the key at `path` does not exist
    pub fn rename_property(&mut self, path: &Path, new_key: &str) -> Result<&JsonObject> {
        if new_key.trim().is_empty() {
            return Err(EditError::Validation("name cannot be empty".to_string()));
        }
        let (Some(parent_path), Some(old_key)) = (path.parent(), path.last()) else {
            return Err(EditError::Validation("cannot rename the root".to_string()));
        };

        let mut parent = tree::get(&self.document, &parent_path)
            .and_then(|node| node.as_object())
            .cloned()
            .ok_or_else(|| PathError::NotFound(parent_path.to_string()))?;
        let value = parent
            .shift_remove(old_key)
            .ok_or_else(|| PathError::NotFound(path.to_string()))?;
        parent.insert(new_key.to_string(), value);

        let doc = tree::set(&self.document, &parent_path, parent.into())?;
        debug!(path = %path, new_key, "renamed property");
        Ok(self.commit(doc))
    }

    /// Deletes the key at the end of `path`.
    ///
    /// Returns the new document, or `None` when nothing was deleted: the root
    /// cannot be deleted and a missing key has nothing to delete, and both
    /// leave the engine unchanged. Callers tracking a selection should clear
    /// it when it [starts with](Path::starts_with) `path`.
    pub fn delete_node(&mut self, path: &Path) -> Option<&JsonObject> {
        if path.is_root() {
            return None;
        }
        match tree::delete(&self.document, path) {
            Ok(doc) => {
                debug!(path = %path, "deleted node");
                Some(self.commit(doc))
            }
            Err(e) => {
                debug!(path = %path, "nothing deleted: {}", e);
                None
            }
        }
    }

    /// Restores the most recent snapshot.
    ///
    /// Returns the restored document, or `None` when there is nothing to undo.
    /// Undo itself is not recorded in the history.
    pub fn undo(&mut self) -> Option<&JsonObject> {
        let previous = self.history.pop()?;
        self.document = previous;
        debug!(remaining = self.history.len(), "undo");
        self.persist();
        Some(&self.document)
    }

    fn commit(&mut self, doc: JsonObject) -> &JsonObject {
        let previous = std::mem::replace(&mut self.document, doc);
        self.history.push(previous);
        self.persist();
        &self.document
    }

    /// Hands the current document to the store. Failures are logged only:
    /// the in-memory change has already happened.
    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.save(&self.document) {
                warn!("failed to persist document: {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::JsonValue;

    fn engine() -> Engine {
        let doc = validate_import(r#"{"a": {"b": 1}}"#).unwrap();
        Engine::new(doc)
    }

    #[test]
    fn test_add_property_blank_key_is_rejected() {
        let mut engine = engine();
        let err = engine.add_property(&Path::root(), "   ", "1").unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_add_property_keeps_untrimmed_key() {
        let mut engine = engine();
        engine.add_property(&Path::root(), " k ", "1").unwrap();
        assert!(engine.document().contains_key(" k "));
    }

    #[test]
    fn test_add_property_creates_missing_parent() {
        let mut engine = engine();
        engine
            .add_property(&Path::new(["x", "y"]), "z", "true")
            .unwrap();
        assert_eq!(
            engine.get(&Path::new(["x", "y", "z"])).unwrap(),
            JsonValue::Boolean(true)
        );
    }

    #[test]
    fn test_add_property_under_scalar_replaces_it() {
        let mut engine = engine();
        engine.add_property(&Path::new(["a", "b"]), "k", "1").unwrap();

        let b = engine.get(&Path::new(["a", "b"])).unwrap();
        let b = b.as_object().unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b["k"], JsonValue::from(1i64));
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_add_property_under_null_replaces_it() {
        let mut engine = Engine::new(validate_import(r#"{"slot": null}"#).unwrap());
        engine.add_property(&Path::new(["slot"]), "k", "v").unwrap();
        assert_eq!(
            engine.get(&Path::new(["slot", "k"])).unwrap(),
            JsonValue::from("v")
        );
    }

    #[test]
    fn test_add_property_too_deep_is_rejected() {
        use crate::document::path::MAX_PATH_DEPTH;

        let mut engine = engine();
        let before = engine.document().clone();
        let parent = Path::new(std::iter::repeat("p").take(MAX_PATH_DEPTH - 2));
        let err = engine.add_property(&parent, "k", "[[1]]").unwrap_err();

        assert!(matches!(err, EditError::Path(PathError::TooDeep { .. })));
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.history_len(), 0);

        // A scalar at the same spot stays within the limit
        engine.add_property(&parent, "k", "1").unwrap();
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_replace_with_too_deep_is_rejected() {
        use crate::document::path::MAX_PATH_DEPTH;

        let mut engine = engine();
        let deep = tree::set(
            &JsonObject::new(),
            &Path::new(std::iter::repeat("p").take(MAX_PATH_DEPTH)),
            JsonValue::Null,
        )
        .unwrap();
        let mut wrapper = JsonObject::new();
        wrapper.insert("w".to_string(), deep.into());

        assert!(engine.replace_with(wrapper).is_err());
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_rename_root_is_rejected() {
        let mut engine = engine();
        let err = engine.rename_property(&Path::root(), "x").unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
    }

    #[test]
    fn test_rename_missing_key_fails() {
        let mut engine = engine();
        let err = engine
            .rename_property(&Path::new(["a", "nope"]), "x")
            .unwrap_err();
        assert!(matches!(err, EditError::Path(PathError::NotFound(_))));
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_delete_root_is_noop() {
        let mut engine = engine();
        let before = engine.document().clone();
        assert!(engine.delete_node(&Path::root()).is_none());
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let mut engine = engine();
        assert!(engine.delete_node(&Path::new(["zzz"])).is_none());
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_delete_reports_commit_with_full_history() {
        let mut engine = engine().with_history_limit(2);
        engine.add_property(&Path::root(), "x", "1").unwrap();
        engine.add_property(&Path::root(), "y", "2").unwrap();
        assert_eq!(engine.history_len(), 2);

        let doc = engine.delete_node(&Path::new(["x"])).unwrap();
        assert!(!doc.contains_key("x"));
        assert_eq!(engine.history_len(), 2);
    }

    #[test]
    fn test_delete_reports_commit_without_history() {
        let mut engine = engine().with_history_limit(0);
        assert!(engine.delete_node(&Path::new(["a"])).is_some());
        assert!(engine.document().is_empty());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut engine = engine();
        let before = engine.document().clone();
        assert!(engine.undo().is_none());
        assert_eq!(engine.document(), &before);
    }
}
