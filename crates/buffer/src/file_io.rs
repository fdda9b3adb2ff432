//! File loading and saving.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use macro_config::constants::MAX_EDITOR_FILE_SIZE;

const MEGABYTE: u64 = 1024 * 1024;

/// File content with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub content: String,
    pub size: u64,
    /// Whether the file permissions forbid writing
    pub permission_readonly: bool,
}

/// Read a file for editing.
///
/// Fails if the file is missing, unreadable, not UTF-8 or too large.
pub fn load(path: &Path) -> Result<LoadedFile> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Cannot open {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }
    if metadata.len() > MAX_EDITOR_FILE_SIZE {
        bail!(
            "File is too large to open ({:.1} MB). Maximum allowed size is {} MB.",
            metadata.len() as f64 / MEGABYTE as f64,
            MAX_EDITOR_FILE_SIZE / MEGABYTE
        );
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Ok(LoadedFile {
        content,
        size: metadata.len(),
        permission_readonly: metadata.permissions().readonly(),
    })
}

/// Like [`load`], but a missing file yields an empty, writable one.
pub fn load_or_empty(path: &Path) -> Result<LoadedFile> {
    if !path.exists() {
        macro_logger::info(format!("{} does not exist yet, starting empty", path.display()));
        return Ok(LoadedFile {
            content: String::new(),
            size: 0,
            permission_readonly: false,
        });
    }
    load(path)
}

/// Write `content` to `path`, returning the number of bytes written.
pub fn write(path: &Path, content: &str) -> Result<u64> {
    fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))?;
    Ok(content.len() as u64)
}
