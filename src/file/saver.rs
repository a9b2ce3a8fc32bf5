//! Document file saving.
//!
//! Writes go to a temporary file that is then renamed over the target, so the
//! target is never left half written.

use crate::document::node::JsonObject;
use crate::document::parser::to_json_string;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::loader::is_gzipped;

/// Options controlling how a document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub indent_size: usize,
    /// Copy an existing target to `<name>.bak` before overwriting it
    pub create_backup: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            create_backup: false,
        }
    }
}

/// Saves `doc` to `path` as pretty-printed JSON.
///
/// Paths ending in `.gz` are gzip-compressed. Parent directories are created
/// as needed.
///
/// # Errors
///
/// Returns an error if the backup, the temp file write, or the final rename
/// fails.
pub fn save_document_file<P: AsRef<Path>>(path: P, doc: &JsonObject, options: SaveOptions) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    if options.create_backup && path.exists() {
        create_backup(path)?;
    }

    let mut json = to_json_string(doc, options.indent_size)
        .with_context(|| format!("Failed to encode {}", path.display()))?;
    json.push('\n');

    write_file_atomic(path, json.as_bytes(), is_gzipped(path))
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// The temp file written before the rename: `<name>.tmp` next to the target.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let mut name: OsString = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
