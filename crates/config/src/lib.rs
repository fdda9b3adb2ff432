//! Configuration management for macro.
//!
//! Loads and saves `config.toml` from the XDG config directory, filling in
//! missing keys with defaults.

pub mod constants;
mod settings;

pub use settings::{
    Config, EditorSettings, GeneralSettings, LoggingSettings, PaletteSettings, ReadOnlyMode,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const STARTUP_MESSAGE: &str = "Macro v0.11.0 | Hit Ctrl-Space for Command Palette.";
    pub const TAB_SIZE: usize = 4;
    pub const PALETTE_MIN_WIDTH: u16 = 40;
    pub const PALETTE_MIN_HEIGHT: u16 = 10;
    pub const MIN_LOG_LEVEL: &str = "info";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates the file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from a specific file.
    ///
    /// Missing keys are completed with defaults and the normalized content is
    /// written back when it differs from what was on disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::validate_content(&original_content)?;

        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/macro/config.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        app_file(dirs::config_dir(), "config", constants::CONFIG_FILE_NAME)
    }

    /// `$XDG_CACHE_HOME/macro/macro.log` unless `logging.file_path` is set.
    /// Falls back to the temp directory when there is no cache directory.
    pub fn log_file_path(&self) -> PathBuf {
        match self.logging.file_path {
            Some(ref path) => PathBuf::from(path),
            None => app_file(dirs::cache_dir(), "cache", constants::LOG_FILE_NAME)
                .unwrap_or_else(|_| std::env::temp_dir().join(constants::LOG_FILE_NAME)),
        }
    }

    /// `$XDG_DATA_HOME/macro/cursor_state.toml`
    pub fn cursor_state_path() -> Result<PathBuf> {
        app_file(dirs::data_dir(), "data", constants::CURSOR_STATE_FILE_NAME)
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

/// `file_name` inside macro's subdirectory of an XDG base directory.
fn app_file(base: Option<PathBuf>, kind: &str, file_name: &str) -> Result<PathBuf> {
    base.map(|dir| dir.join(constants::APP_DIR_NAME).join(file_name))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_creates_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_missing_keys_are_completed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\ntab_size = 8\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.editor.tab_size, 8);
        assert_eq!(config.editor.read_only, ReadOnlyMode::Auto);
        assert_eq!(config.palette.min_width, defaults::PALETTE_MIN_WIDTH);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("[palette]"));
        assert!(rewritten.contains("tab_size = 8"));
    }

    #[test]
    fn test_read_only_mode_parsing() {
        let config = Config::validate_content("[editor]\nread_only = \"ro\"\n").unwrap();
        assert_eq!(config.editor.read_only, ReadOnlyMode::Ro);
        assert!(Config::validate_content("[editor]\nread_only = \"maybe\"\n").is_err());
    }

    #[test]
    fn test_read_only_mode_resolve() {
        assert!(ReadOnlyMode::Ro.resolve(false));
        assert!(!ReadOnlyMode::Auto.resolve(false));
        assert!(ReadOnlyMode::Auto.resolve(true));
        assert!(ReadOnlyMode::Rw.resolve(true));
    }

    #[test]
    fn test_app_file_layout() {
        let path = app_file(Some(PathBuf::from("/home/u/.config")), "config", "config.toml");
        assert_eq!(path.unwrap(), PathBuf::from("/home/u/.config/macro/config.toml"));

        let err = app_file(None, "data", "cursor_state.toml").unwrap_err();
        assert_eq!(err.to_string(), "Failed to determine data directory");
    }

    #[test]
    fn test_log_file_override() {
        let mut config = Config::default();
        config.logging.file_path = Some("/tmp/macro-test.log".to_string());
        assert_eq!(config.log_file_path(), PathBuf::from("/tmp/macro-test.log"));
    }
}
