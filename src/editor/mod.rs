//! Stateful editing of a document.
//!
//! # Modules
//!
//! - `engine`: the [`engine::Engine`] that applies edits and undo
//! - `history`: the bounded snapshot stack behind undo
//!
//! # Example
//!
//! ```
//! use treequill::document::node::default_document;
//! use treequill::document::path::Path;
//! use treequill::editor::engine::Engine;
//!
//! let mut engine = Engine::new(default_document());
//! assert!(engine.delete_node(&Path::new(["auto"])).is_some());
//! assert!(engine.document().is_empty());
//! assert!(engine.can_undo());
//! ```

pub mod engine;
pub mod history;

pub use engine::Engine;
pub use history::History;
