//! Configuration structures for macro settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Command palette and list dialog settings
    #[serde(default)]
    pub palette: PaletteSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Status line text shown when nothing else is reported
    #[serde(default = "default_startup_message")]
    pub startup_message: String,
}

/// How the read-only flag of opened files is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadOnlyMode {
    /// Follow file permissions
    #[default]
    Auto,
    /// Open everything read-only
    Ro,
    /// Open everything writable unless the file itself is not writable
    Rw,
}

impl ReadOnlyMode {
    /// Decide the read-only flag of a file given its permission bit.
    pub fn resolve(self, permission_readonly: bool) -> bool {
        match self {
            ReadOnlyMode::Auto | ReadOnlyMode::Rw => permission_readonly,
            ReadOnlyMode::Ro => true,
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Tab size (number of spaces)
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Read-only handling of opened files
    #[serde(default)]
    pub read_only: ReadOnlyMode,
}

/// Palette settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSettings {
    /// Minimum dialog width in columns
    #[serde(default = "default_palette_min_width")]
    pub min_width: u16,

    /// Minimum dialog height in rows
    #[serde(default = "default_palette_min_height")]
    pub min_height: u16,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (defaults to the cache directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_startup_message() -> String {
    defaults::STARTUP_MESSAGE.to_string()
}

fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_palette_min_width() -> u16 {
    defaults::PALETTE_MIN_WIDTH
}

fn default_palette_min_height() -> u16 {
    defaults::PALETTE_MIN_HEIGHT
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            startup_message: default_startup_message(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            read_only: ReadOnlyMode::default(),
        }
    }
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            min_width: default_palette_min_width(),
            min_height: default_palette_min_height(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
