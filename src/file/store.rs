//! Persistence for the edited document.
//!
//! A [`DocumentStore`] is read once when an engine starts and receives the
//! current document after every change. Stores report failures, but the engine
//! only logs them: a failed save never undoes an edit.

use crate::document::node::JsonObject;
use anyhow::{bail, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::loader::load_document_file;
use super::saver::{save_document_file, SaveOptions};

/// Somewhere a document is kept between sessions.
pub trait DocumentStore {
    /// Reads the stored document. `Ok(None)` means nothing has been stored yet.
    fn load(&mut self) -> Result<Option<JsonObject>>;

    /// Overwrites the stored document.
    fn save(&mut self, doc: &JsonObject) -> Result<()>;
}

/// Keeps the document as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    options: SaveOptions,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: SaveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SaveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&mut self) -> Result<Option<JsonObject>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_document_file(&self.path).map(Some)
    }

    fn save(&mut self, doc: &JsonObject) -> Result<()> {
        save_document_file(&self.path, doc, self.options)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<JsonObject>,
    saves: usize,
    fail_saves: bool,
}

/// Keeps the document in memory.
///
/// Clones share state, so a test can keep one handle and give another to an
/// engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `doc`.
    pub fn with_document(doc: JsonObject) -> Self {
        let store = Self::new();
        store.state.borrow_mut().document = Some(doc);
        store
    }

    /// Makes every subsequent save fail.
    pub fn fail_saves(&self, fail: bool) {
        self.state.borrow_mut().fail_saves = fail;
    }

    /// The most recently stored document.
    pub fn document(&self) -> Option<JsonObject> {
        self.state.borrow().document.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.state.borrow().saves
    }
}

impl DocumentStore for MemoryStore {
    fn load(&mut self) -> Result<Option<JsonObject>> {
        Ok(self.state.borrow().document.clone())
    }

    fn save(&mut self, doc: &JsonObject) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_saves {
            bail!("memory store is refusing writes");
        }
        state.document = Some(doc.clone());
        state.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::JsonValue;

    #[test]
    fn test_memory_store_shares_state_between_clones() {
        let store = MemoryStore::new();
        let mut handle = store.clone();

        let mut doc = JsonObject::new();
        doc.insert("k".to_string(), JsonValue::Null);
        handle.save(&doc).unwrap();

        assert_eq!(store.document(), Some(doc));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_failing_saves() {
        let store = MemoryStore::new();
        store.fail_saves(true);
        let mut handle = store.clone();

        assert!(handle.save(&JsonObject::new()).is_err());
        assert_eq!(store.document(), None);
        assert_eq!(store.save_count(), 0);
    }
}
