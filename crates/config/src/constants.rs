//! Application-wide constants.

/// Subdirectory of the XDG config, data and cache directories.
pub const APP_DIR_NAME: &str = "macro";

/// Event polling interval for the main loop (ms).
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Caret blink interval for text inputs (ms).
pub const CARET_BLINK_INTERVAL_MS: u64 = 530;

/// Maximum number of log entries kept in memory.
pub const MAX_LOG_ENTRIES: usize = 1000;

/// Log file name inside the cache directory.
pub const LOG_FILE_NAME: &str = "macro.log";

/// Cursor state file name inside the data directory.
pub const CURSOR_STATE_FILE_NAME: &str = "cursor_state.toml";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Largest file the editor agrees to open (bytes).
pub const MAX_EDITOR_FILE_SIZE: u64 = 64 * 1024 * 1024;
