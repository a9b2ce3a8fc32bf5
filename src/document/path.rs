//! Key paths into a document.
//!
//! A [`Path`] is a sequence of object keys walked from the root. The empty path
//! is the root itself. Paths never index into arrays.

use std::fmt;

use crate::error::{EditError, Result};

/// Deepest nesting a document may reach, counting the root object.
///
/// serde_json stops reading at its 128th level, so this is the deepest
/// document a saved file can be loaded back from. It also bounds path length.
pub const MAX_PATH_DEPTH: usize = 127;

/// An ordered sequence of object keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// The empty path, addressing the root object.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parses a path from user input.
    ///
    /// - `""` and `"."` are the root
    /// - text starting with `[` is a JSON array of strings, for keys containing dots
    /// - anything else is split on `.`
    ///
    /// ```
    /// use treequill::document::path::Path;
    ///
    /// assert_eq!(Path::parse("a.b").unwrap(), Path::new(["a", "b"]));
    /// assert_eq!(Path::parse(r#"["a.b"]"#).unwrap(), Path::new(["a.b"]));
    /// assert!(Path::parse(".").unwrap().is_root());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() || text == "." {
            return Ok(Self::root());
        }
        if text.starts_with('[') {
            let segments: Vec<String> = serde_json::from_str(text)
                .map_err(|e| EditError::Validation(format!("invalid path '{}': {}", text, e)))?;
            return Ok(Self(segments));
        }
        if text.split('.').any(str::is_empty) {
            return Err(EditError::Validation(format!(
                "invalid path '{}': empty segment",
                text
            )));
        }
        Ok(Self(text.split('.').map(str::to_string).collect()))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final key, or `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path without its final key, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        self.0
            .split_last()
            .map(|(_, parent)| Path(parent.to_vec()))
    }

    pub fn child(&self, key: impl Into<String>) -> Path {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Path(segments)
    }

    /// True when `prefix` addresses this path or one of its ancestors.
    ///
    /// Callers tracking a selection use this after a delete: a selection that
    /// starts with the deleted path no longer exists.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_segment() {
        assert!(Path::parse("a..b").is_err());
        assert!(Path::parse("a.").is_err());
    }

    #[test]
    fn test_parse_json_array_form() {
        let path = Path::parse(r#"["with space", "x.y"]"#).unwrap();
        assert_eq!(path.segments(), &["with space".to_string(), "x.y".to_string()]);
        assert!(Path::parse("[1, 2]").is_err());
    }

    #[test]
    fn test_parent_and_last() {
        let path = Path::new(["a", "b", "c"]);
        assert_eq!(path.last(), Some("c"));
        assert_eq!(path.parent(), Some(Path::new(["a", "b"])));
        assert_eq!(Path::root().parent(), None);
        assert_eq!(Path::root().last(), None);
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let selected = Path::new(["ab", "c"]);
        assert!(selected.starts_with(&Path::new(["ab"])));
        assert!(selected.starts_with(&selected));
        assert!(!selected.starts_with(&Path::new(["a"])));
        assert!(selected.starts_with(&Path::root()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::root().to_string(), ".");
        assert_eq!(Path::new(["a", "b"]).to_string(), "a.b");
        assert_eq!(Path::new(["a"]).child("b"), Path::new(["a", "b"]));
    }
}
