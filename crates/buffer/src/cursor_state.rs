//! Cursor positions remembered per file across sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::text_area::CursorPos;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredPosition {
    line: usize,
    column: usize,
}

/// Cursor positions keyed by absolute file path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    #[serde(default)]
    positions: BTreeMap<String, StoredPosition>,
}

fn key(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| PathBuf::from(path))
    };
    absolute.to_string_lossy().into_owned()
}

impl CursorState {
    /// Load the state file. A missing or unreadable file gives an empty
    /// state.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            macro_logger::warn(format!("Ignoring corrupt cursor state {}: {}", path.display(), e));
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn get(&self, file: &Path) -> Option<CursorPos> {
        self.positions.get(&key(file)).map(|p| CursorPos {
            line: p.line,
            column: p.column,
        })
    }

    pub fn set(&mut self, file: &Path, pos: CursorPos) {
        self.positions.insert(
            key(file),
            StoredPosition {
                line: pos.line,
                column: pos.column,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
