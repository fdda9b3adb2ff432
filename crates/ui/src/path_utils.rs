//! Path helpers for titles and listings.

use std::path::{Path, PathBuf};

/// Extract file name from path as String.
///
/// Returns "Untitled" if the path has no file name or it's not valid UTF-8.
pub fn file_name_or_untitled(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Directory containing `path`, falling back to the current directory.
///
/// A bare file name like `notes.txt` has an empty parent, which is not
/// something we can list, so it maps to `.`.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_or_untitled() {
        assert_eq!(file_name_or_untitled(Path::new("/foo/bar/test.rs")), "test.rs");
        assert_eq!(file_name_or_untitled(Path::new("simple.txt")), "simple.txt");
        assert_eq!(file_name_or_untitled(Path::new("/")), "Untitled");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("/foo/bar/test.rs")), PathBuf::from("/foo/bar"));
        assert_eq!(parent_dir(Path::new("test.rs")), PathBuf::from("."));
    }
}
