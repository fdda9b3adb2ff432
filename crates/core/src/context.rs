//! The capability surface the editor exposes to plugins and dialogs.

use std::path::{Path, PathBuf};

use anyhow::Result;
use macro_config::Config;

use crate::dialog::Dialog;
use crate::message::Action;
use crate::registry::CommandDescriptor;

/// Summary of an open buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferInfo {
    /// File backing the buffer, if any
    pub path: Option<PathBuf>,
    pub read_only: bool,
    pub modified: bool,
}

/// Editor operations available to command closures, dialogs and plugin
/// messages.
///
/// Implementations are synchronous: a mutation is visible to every read
/// that follows it in the same call chain. Anything slow (disk writes) is
/// returned as an [`Action`] instead of being performed inline.
pub trait EditorContext {
    // Buffer queries

    /// Path of the current buffer, `None` when no buffer is open or it is
    /// unnamed.
    fn current_file_path(&self) -> Option<PathBuf>;
    fn is_current_buffer_read_only(&self) -> bool;
    /// Full text of the current buffer, including unsynced widget edits.
    fn current_content(&self) -> String;
    fn buffers(&self) -> Vec<BufferInfo>;
    fn current_buffer_index(&self) -> Option<usize>;
    /// Whether any open buffer has unsaved changes.
    fn has_unsaved_changes(&self) -> bool;
    fn is_current_buffer_modified(&self) -> bool;

    // Buffer mutations

    /// Copy the editing widget state (content and cursor) into the buffer.
    fn save_current_buffer_state(&mut self);
    /// Write the current buffer to disk in the background.
    ///
    /// The returned action reports the outcome through the message loop.
    fn persist_current_buffer(&mut self) -> Option<Action>;
    /// Record a completed save of `path`: the buffer backed by it takes
    /// `content` and `size` as its on-disk state. Edits made after the
    /// content was captured stay unsaved.
    fn update_buffer_after_save(&mut self, path: &Path, content: String, size: u64);
    /// Open a file in a new buffer, or switch to it when already open.
    fn open_file(&mut self, path: &Path) -> Result<()>;
    fn switch_to_buffer(&mut self, index: usize);
    /// Close the current buffer. Returns true when it was the last one.
    fn close_current_buffer(&mut self) -> bool;
    /// Move the cursor (0-based line and column, clamped to the content).
    fn set_cursor_position(&mut self, line: usize, col: usize);
    /// Remember cursor positions of open files for the next session.
    fn save_cursor_state(&mut self);

    // Status line

    /// Show an informational message, replacing any error.
    fn set_info(&mut self, message: String);
    /// Show an error message, replacing any informational one.
    fn set_error(&mut self, message: String);

    // Dialogs

    /// Make `dialog` the single active dialog, discarding the previous one.
    ///
    /// Returns the dialog's init action for the loop to perform.
    fn set_active_dialog(&mut self, dialog: Box<dyn Dialog>) -> Option<Action>;
    /// Open the file picker rooted at `dir`.
    fn show_file_picker(&mut self, dir: &Path) -> Option<Action>;

    // Commands

    /// Snapshot of the registered commands, in registration order.
    fn commands(&self) -> Vec<CommandDescriptor>;
    /// Run a registered command by name.
    ///
    /// Unknown names and commands without an execute closure do nothing.
    fn execute_command(&mut self, name: &str) -> Option<Action>;

    fn config(&self) -> &Config;
}
