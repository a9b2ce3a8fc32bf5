//! File I/O and persistence for documents.
//!
//! This module loads documents from disk, saves them with atomic writes and
//! optional backups, and exposes both through the [`store::DocumentStore`]
//! trait used by the editing engine.

pub mod loader;
pub mod saver;
pub mod store;
