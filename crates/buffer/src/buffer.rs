//! An open file and its editing state.

use std::path::{Path, PathBuf};

use crate::text_area::CursorPos;

/// An open buffer.
///
/// While a buffer is current, its live text is held by the editor's
/// [`TextArea`](crate::TextArea); `content` and `cursor` are refreshed from
/// it when the editor syncs state (before switching buffers, saving or
/// quitting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    pub path: PathBuf,
    pub content: String,
    /// Content as of the last load or save
    pub original: String,
    /// Size on disk in bytes, as of the last load or save
    pub size: u64,
    pub read_only: bool,
    pub cursor: CursorPos,
}

impl Buffer {
    pub fn new(path: PathBuf, content: String, size: u64, read_only: bool) -> Self {
        Self {
            path,
            original: content.clone(),
            content,
            size,
            read_only,
            cursor: CursorPos::default(),
        }
    }

    pub fn is_backed_by(&self, path: &Path) -> bool {
        self.path == path
    }

    /// Whether `text` differs from what is on disk.
    pub fn differs_from_disk(&self, text: &str) -> bool {
        self.original != text
    }

    /// Modified as of the last sync.
    pub fn is_modified(&self) -> bool {
        self.differs_from_disk(&self.content)
    }

    /// Record a completed save of `saved`. Edits made after the content was
    /// captured stay modified.
    pub fn mark_saved(&mut self, saved: String, size: u64) {
        self.original = saved;
        self.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_compares_with_original() {
        let mut buffer = Buffer::new("a.txt".into(), "old".into(), 3, false);
        assert!(!buffer.is_modified());
        buffer.content = "olde".into();
        assert!(buffer.is_modified());
        buffer.content = "old".into();
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_mark_saved() {
        let mut buffer = Buffer::new("a.txt".into(), "old".into(), 3, false);
        buffer.content = "newer".into();
        buffer.mark_saved("newer".into(), 5);
        assert!(!buffer.is_modified());
        assert_eq!(buffer.size, 5);
        assert!(buffer.is_backed_by(Path::new("a.txt")));
    }

    #[test]
    fn test_edits_after_capture_stay_modified() {
        let mut buffer = Buffer::new("a.txt".into(), "old".into(), 3, false);
        buffer.content = "newest".into();
        buffer.mark_saved("newer".into(), 5);
        assert!(buffer.is_modified());
    }
}
