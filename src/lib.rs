//! TreeQuill - a path-addressed editor for hierarchical JSON documents.
//!
//! The document is always a JSON object. Values are read, added, renamed and
//! deleted by key path, and the last few changes can be undone.
//!
//! - [`document`]: value types, paths, pure navigation, import validation
//! - [`editor`]: the stateful [`editor::Engine`] and its undo history
//! - [`file`]: loading, saving and the [`file::store::DocumentStore`] trait
//! - [`config`]: TOML configuration
//! - [`input`]: the command shell used by the binary

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod file;
pub mod input;
pub mod logging;

pub use error::{EditError, PathError};
