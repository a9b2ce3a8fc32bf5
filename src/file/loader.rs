//! Document file loading.
//!
//! A document file holds a single JSON object. Files ending in `.gz` are
//! gzip-compressed.

use crate::document::node::JsonObject;
use crate::document::parser::validate_import;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads a document from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decompressed, or if its
/// contents are not a JSON object.
///
/// # Examples
///
/// ```no_run
/// use treequill::file::loader::load_document_file;
///
/// let doc = load_document_file("document.json").unwrap();
/// println!("{} top-level keys", doc.len());
/// ```
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<JsonObject> {
    let path = path.as_ref();

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    validate_import(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// True when the file name ends in `.gz`.
pub fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped("doc.json.gz"));
        assert!(!is_gzipped("doc.json"));
        assert!(!is_gzipped("gz"));
    }
}
