//! Document model and key-path navigation.
//!
//! - `node`: the JSON value types and the startup document
//! - `path`: key paths into a document
//! - `tree`: pure get / set / delete over a document
//! - `parser`: text and serde_json conversion, import validation

pub mod node;
pub mod parser;
pub mod path;
pub mod tree;
