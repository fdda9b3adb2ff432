//! Editor state and its [`EditorContext`] implementation.
//!
//! The current buffer's live text is held by a [`TextArea`]; the
//! [`Buffer`] list keeps a snapshot of every open file that is refreshed
//! whenever the editor syncs (switching buffers, saving, quitting).

use std::path::{Path, PathBuf};

use anyhow::Result;
use macro_buffer::{file_io, Buffer, CursorPos, CursorState, TextArea};
use macro_config::Config;
use macro_core::{
    Action, BufferInfo, CommandDescriptor, CommandRegistry, Dialog, EditorContext, Message,
    PluginMessage,
};
use macro_dialog::FilePickerDialog;

/// Global editor state
#[derive(Debug)]
pub struct AppState {
    /// Should the editor quit
    pub should_quit: bool,
    /// Redraw on the next loop iteration
    pub needs_redraw: bool,
    pub config: Config,
    pub registry: CommandRegistry,
    pub buffers: Vec<Buffer>,
    pub current: Option<usize>,
    /// Editing widget for the current buffer
    pub editor: TextArea,
    /// Status message (message, is_error)
    pub status_message: Option<(String, bool)>,
    pub active_dialog: Option<Box<dyn Dialog>>,
    pub cursor_state: CursorState,
    /// Where cursor positions are persisted, `None` to keep them in memory
    pub cursor_state_path: Option<PathBuf>,
    /// Terminal size (width, height)
    pub terminal: (u16, u16),
}

impl AppState {
    pub fn new(config: Config, registry: CommandRegistry) -> Self {
        let editor = TextArea::new("", config.editor.tab_size);
        Self {
            should_quit: false,
            needs_redraw: true,
            config,
            registry,
            buffers: Vec::new(),
            current: None,
            editor,
            status_message: None,
            active_dialog: None,
            cursor_state: CursorState::default(),
            cursor_state_path: None,
            terminal: (80, 24),
        }
    }

    /// Load and later persist cursor positions at `path`.
    pub fn with_cursor_state(mut self, path: PathBuf) -> Self {
        self.cursor_state = CursorState::load_from(&path);
        self.cursor_state_path = Some(path);
        self
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal = (width, height);
    }

    pub fn current_buffer(&self) -> Option<&Buffer> {
        self.current.and_then(|idx| self.buffers.get(idx))
    }

    /// Open `path` for editing, starting an empty buffer when the file does
    /// not exist yet.
    pub fn open_or_create(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            return self.open_file(path);
        }
        self.sync_editor();
        let loaded = file_io::load_or_empty(path)?;
        self.push_buffer(path, loaded);
        Ok(())
    }

    /// Copy the widget's text and cursor into the current buffer.
    fn sync_editor(&mut self) {
        let Some(idx) = self.current else {
            return;
        };
        let content = self.editor.text();
        let cursor = self.editor.cursor();
        if let Some(buffer) = self.buffers.get_mut(idx) {
            buffer.content = content;
            buffer.cursor = cursor;
        }
    }

    /// Whether buffer `idx` differs from disk, reading the live widget
    /// text for the current buffer.
    fn is_buffer_modified(&self, idx: usize) -> bool {
        let Some(buffer) = self.buffers.get(idx) else {
            return false;
        };
        if self.current == Some(idx) {
            buffer.differs_from_disk(&self.editor.text())
        } else {
            buffer.is_modified()
        }
    }

    /// Rebuild the widget from the current buffer.
    fn load_editor(&mut self) {
        let tab_size = self.config.editor.tab_size;
        self.editor = match self.current_buffer() {
            Some(buffer) => {
                let mut editor = TextArea::new(&buffer.content, tab_size);
                editor.set_read_only(buffer.read_only);
                editor.set_cursor(buffer.cursor.line, buffer.cursor.column);
                editor
            }
            None => TextArea::new("", tab_size),
        };
    }

    fn push_buffer(&mut self, path: &Path, loaded: file_io::LoadedFile) {
        let read_only = self
            .config
            .editor
            .read_only
            .resolve(loaded.permission_readonly);
        let mut buffer = Buffer::new(
            path.to_path_buf(),
            loaded.content,
            loaded.size,
            read_only,
        );
        if let Some(pos) = self.cursor_state.get(path) {
            buffer.cursor = pos;
        }
        macro_logger::info(format!(
            "Opened {} ({} bytes{})",
            path.display(),
            buffer.size,
            if read_only { ", read-only" } else { "" }
        ));
        self.buffers.push(buffer);
        self.current = Some(self.buffers.len() - 1);
        self.load_editor();
    }

    fn remember_cursor(&mut self, idx: usize) {
        if let Some(buffer) = self.buffers.get(idx) {
            self.cursor_state.set(&buffer.path, buffer.cursor);
        }
    }

    /// Text of the status line: the message, or the startup message.
    pub fn status_text(&self) -> (&str, bool) {
        match &self.status_message {
            Some((message, is_error)) => (message.as_str(), *is_error),
            None => (self.config.general.startup_message.as_str(), false),
        }
    }
}

/// Result of a background save.
#[derive(Debug)]
pub struct SaveFinished {
    pub path: PathBuf,
    /// Content that was written
    pub content: String,
    pub result: Result<u64>,
}

impl PluginMessage for SaveFinished {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        match self.result {
            Ok(size) => {
                macro_logger::info(format!("Saved {} ({} bytes)", self.path.display(), size));
                ctx.update_buffer_after_save(&self.path, self.content, size);
                ctx.set_info(format!("Saved to {}", self.path.display()));
            }
            Err(e) => {
                macro_logger::error(format!("Failed to save {}: {:#}", self.path.display(), e));
                ctx.set_error(format!("Error saving: {:#}", e));
            }
        }
        None
    }
}

impl EditorContext for AppState {
    fn current_file_path(&self) -> Option<PathBuf> {
        self.current_buffer().map(|b| b.path.clone())
    }

    fn is_current_buffer_read_only(&self) -> bool {
        self.current_buffer().is_some_and(|b| b.read_only)
    }

    fn current_content(&self) -> String {
        if self.current.is_some() {
            self.editor.text()
        } else {
            String::new()
        }
    }

    fn buffers(&self) -> Vec<BufferInfo> {
        self.buffers
            .iter()
            .enumerate()
            .map(|(idx, b)| BufferInfo {
                path: Some(b.path.clone()),
                read_only: b.read_only,
                modified: self.is_buffer_modified(idx),
            })
            .collect()
    }

    fn current_buffer_index(&self) -> Option<usize> {
        self.current
    }

    fn has_unsaved_changes(&self) -> bool {
        (0..self.buffers.len()).any(|idx| self.is_buffer_modified(idx))
    }

    fn is_current_buffer_modified(&self) -> bool {
        self.current.is_some_and(|idx| self.is_buffer_modified(idx))
    }

    fn save_current_buffer_state(&mut self) {
        self.sync_editor();
    }

    fn persist_current_buffer(&mut self) -> Option<Action> {
        let path = self.current_file_path()?;
        let content = self.editor.text();
        Some(Action::spawn(move || {
            let result = file_io::write(&path, &content);
            Message::plugin(SaveFinished {
                path,
                content,
                result,
            })
        }))
    }

    fn update_buffer_after_save(&mut self, path: &Path, content: String, size: u64) {
        // The buffer may have been closed while the write was running
        if let Some(buffer) = self.buffers.iter_mut().find(|b| b.is_backed_by(path)) {
            buffer.mark_saved(content, size);
        }
    }

    fn open_file(&mut self, path: &Path) -> Result<()> {
        if let Some(idx) = self.buffers.iter().position(|b| b.is_backed_by(path)) {
            self.switch_to_buffer(idx);
            return Ok(());
        }
        let loaded = file_io::load(path)?;
        self.sync_editor();
        self.push_buffer(path, loaded);
        Ok(())
    }

    fn switch_to_buffer(&mut self, index: usize) {
        if index >= self.buffers.len() || self.current == Some(index) {
            return;
        }
        self.sync_editor();
        self.current = Some(index);
        self.load_editor();
        macro_logger::debug(format!("Switched to buffer {}", index));
    }

    fn close_current_buffer(&mut self) -> bool {
        let Some(idx) = self.current else {
            return true;
        };
        self.sync_editor();
        self.remember_cursor(idx);
        let closed = self.buffers.remove(idx);
        macro_logger::info(format!("Closed {}", macro_ui::file_name_or_untitled(&closed.path)));
        if self.buffers.is_empty() {
            self.current = None;
            self.load_editor();
            return true;
        }
        self.current = Some(idx.min(self.buffers.len() - 1));
        self.load_editor();
        false
    }

    fn set_cursor_position(&mut self, line: usize, col: usize) {
        if self.current.is_some() {
            self.editor.set_cursor(line, col);
        }
    }

    fn save_cursor_state(&mut self) {
        self.sync_editor();
        for idx in 0..self.buffers.len() {
            self.remember_cursor(idx);
        }
        let Some(path) = &self.cursor_state_path else {
            return;
        };
        if let Err(e) = self.cursor_state.save_to(path) {
            macro_logger::warn(format!("Failed to save cursor state: {:#}", e));
        }
    }

    fn set_info(&mut self, message: String) {
        self.status_message = Some((message, false));
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some((message, true));
    }

    fn set_active_dialog(&mut self, mut dialog: Box<dyn Dialog>) -> Option<Action> {
        macro_logger::debug("Dialog opened");
        let init = dialog.init();
        self.active_dialog = Some(dialog);
        let (width, height) = self.terminal;
        Action::batch([init, Some(Action::Emit(Message::Resize { width, height }))])
    }

    fn show_file_picker(&mut self, dir: &Path) -> Option<Action> {
        let picker = FilePickerDialog::new(dir, self.config.palette.clone());
        self.set_active_dialog(Box::new(picker))
    }

    fn commands(&self) -> Vec<CommandDescriptor> {
        self.registry.list()
    }

    fn execute_command(&mut self, name: &str) -> Option<Action> {
        let Some(command) = self.registry.get(name).cloned() else {
            macro_logger::warn(format!("Unknown command '{}'", name));
            return None;
        };
        macro_logger::info(format!("Executing command '{}'", name));
        command.run(self)
    }

    fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_config::ReadOnlyMode;
    use macro_core::RegistryBuilder;
    use std::fs;

    fn state() -> AppState {
        AppState::new(Config::default(), CommandRegistry::default())
    }

    #[test]
    fn test_open_switch_keeps_edits() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "alpha").unwrap();
        fs::write(&b, "beta").unwrap();

        let mut state = state();
        state.open_file(&a).unwrap();
        state.editor.move_end();
        state.editor.insert_str("!");
        state.open_file(&b).unwrap();
        assert_eq!(state.current_content(), "beta");
        assert!(state.has_unsaved_changes());
        assert!(!state.is_current_buffer_modified());

        state.open_file(&a).unwrap();
        assert_eq!(state.buffers.len(), 2);
        assert_eq!(state.current_content(), "alpha!");
        assert!(state.is_current_buffer_modified());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        assert!(state.open_file(&dir.path().join("nope.txt")).is_err());
        assert!(state.current.is_none());
    }

    #[test]
    fn test_open_or_create_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let mut state = state();
        state.open_or_create(&path).unwrap();
        assert_eq!(state.current_file_path(), Some(path));
        assert_eq!(state.current_content(), "");
        assert!(!state.is_current_buffer_read_only());
    }

    #[test]
    fn test_read_only_mode_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x").unwrap();
        let mut config = Config::default();
        config.editor.read_only = ReadOnlyMode::Ro;
        let mut state = AppState::new(config, CommandRegistry::default());
        state.open_file(&path).unwrap();
        assert!(state.is_current_buffer_read_only());
        assert!(state.editor.is_read_only());
    }

    #[test]
    fn test_close_last_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x").unwrap();
        let mut state = state();
        state.open_file(&path).unwrap();
        assert!(state.close_current_buffer());
        assert!(state.current.is_none());
        assert_eq!(state.current_content(), "");
        assert!(state.close_current_buffer());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "one").unwrap();
        let mut state = state();
        state.open_file(&path).unwrap();
        state.editor.insert_str("zero ");

        let Some(Action::Spawn(job)) = state.persist_current_buffer() else {
            panic!("expected a background write");
        };
        let Message::Plugin(done) = job() else {
            panic!("expected a plugin message");
        };
        assert!(done.handle(&mut state).is_none());

        assert_eq!(fs::read_to_string(&path).unwrap(), "zero one");
        assert!(!state.has_unsaved_changes());
        assert_eq!(state.current_buffer().unwrap().size, 8);
        assert_eq!(
            state.status_message,
            Some((format!("Saved to {}", path.display()), false))
        );
    }

    #[test]
    fn test_save_failure_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        let msg = Box::new(SaveFinished {
            path: dir.path().join("missing").join("a.txt"),
            content: String::new(),
            result: Err(anyhow::anyhow!("disk full")),
        });
        msg.handle(&mut state);
        assert_eq!(
            state.status_message,
            Some(("Error saving: disk full".to_string(), true))
        );
    }

    #[test]
    fn test_edits_during_save_stay_unsaved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "one").unwrap();
        let mut state = state();
        state.open_file(&path).unwrap();
        state.editor.insert_str("x");
        let written = state.current_content();
        state.editor.insert_str("y");
        state.update_buffer_after_save(&path, written, 4);
        assert!(state.is_current_buffer_modified());
    }

    #[test]
    fn test_reverted_edit_is_not_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "world").unwrap();
        let mut state = state();
        state.open_file(&path).unwrap();
        state.editor.insert_str("x");
        assert!(state.is_current_buffer_modified());
        state.editor.backspace();

        assert_eq!(state.current_content(), "world");
        assert!(!state.is_current_buffer_modified());
        assert!(!state.has_unsaved_changes());
        assert!(!state.buffers()[0].modified);
    }

    #[test]
    fn test_save_finishing_after_switch_clears_saved_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "alpha").unwrap();
        fs::write(&b, "beta").unwrap();
        let mut state = state();
        state.open_file(&a).unwrap();
        state.open_file(&b).unwrap();
        state.switch_to_buffer(0);
        state.editor.insert_str("new ");

        let Some(Action::Spawn(job)) = state.persist_current_buffer() else {
            panic!("expected a background write");
        };
        state.switch_to_buffer(1);
        assert!(state.has_unsaved_changes());
        let Message::Plugin(done) = job() else {
            panic!("expected a plugin message");
        };
        done.handle(&mut state);

        assert_eq!(fs::read_to_string(&a).unwrap(), "new alpha");
        assert!(!state.has_unsaved_changes());
        assert_eq!(state.buffers[0].size, 9);
        assert_eq!(state.current_content(), "beta");
    }

    #[test]
    fn test_cursor_state_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        let state_file = dir.path().join("cursor_state.toml");
        fs::write(&file, "one\ntwo\nthree").unwrap();

        let mut state = state().with_cursor_state(state_file.clone());
        state.open_file(&file).unwrap();
        state.set_cursor_position(2, 3);
        state.save_cursor_state();

        let mut reopened = state_after_restart(&state_file);
        reopened.open_file(&file).unwrap();
        assert_eq!(reopened.editor.cursor(), CursorPos { line: 2, column: 3 });
    }

    fn state_after_restart(state_file: &Path) -> AppState {
        state().with_cursor_state(state_file.to_path_buf())
    }

    #[test]
    fn test_dialog_gets_terminal_size() {
        let mut state = state();
        state.update_terminal_size(120, 40);
        let dir = tempfile::tempdir().unwrap();
        let action = state.show_file_picker(dir.path());
        let Some(Action::Batch(actions)) = action else {
            panic!("expected init and resize");
        };
        assert!(matches!(
            actions.last(),
            Some(Action::Emit(Message::Resize {
                width: 120,
                height: 40
            }))
        ));
        assert!(state.active_dialog.is_some());
    }

    #[test]
    fn test_execute_command_by_name() {
        let mut builder = RegistryBuilder::new();
        builder.register(CommandDescriptor::new("hello", "", "").with_execute(|ctx| {
            ctx.set_info("hi".to_string());
            None
        }));
        builder.register(CommandDescriptor::new("inert", "", ""));
        let mut state = AppState::new(Config::default(), builder.build());

        state.execute_command("missing");
        state.execute_command("inert");
        assert!(state.status_message.is_none());
        state.execute_command("hello");
        assert_eq!(state.status_message, Some(("hi".to_string(), false)));
    }
}
