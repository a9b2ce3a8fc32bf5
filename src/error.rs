//! Error types for document navigation and editing.
//!
//! Every error here is recoverable: an operation that returns one has left the
//! document and its history exactly as they were.

use thiserror::Error;

/// Structural failures of a path operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    EmptyPath,
    #[error("no value at '{0}'")]
    NotFound(String),
    #[error("the document root must be an object")]
    RootNotObject,
    #[error("document would nest {depth} levels deep, the limit is {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Errors reported by the editing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Malformed or non-object JSON supplied as a whole document.
    #[error("parse error: {0}")]
    Parse(String),
    /// A name supplied to add or rename was rejected.
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

pub type Result<T> = std::result::Result<T, EditError>;
