//! In-memory [`EditorContext`] for exercising dialogs and plugins.
//!
//! Buffers live in memory, dialogs and messages are recorded instead of
//! rendered, and `open_file` reads from disk so tests can point it at a
//! temporary directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use macro_config::Config;

use crate::context::{BufferInfo, EditorContext};
use crate::dialog::Dialog;
use crate::message::{Action, Message};
use crate::registry::{CommandDescriptor, CommandRegistry};

/// Buffer held by [`RecordingContext`].
#[derive(Debug, Clone, Default)]
pub struct FakeBuffer {
    pub path: Option<PathBuf>,
    pub content: String,
    pub read_only: bool,
    pub modified: bool,
    pub cursor: (usize, usize),
}

impl FakeBuffer {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }

    fn info(&self) -> BufferInfo {
        BufferInfo {
            path: self.path.clone(),
            read_only: self.read_only,
            modified: self.modified,
        }
    }
}

/// Editor context that records what plugins ask of it.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub buffers: Vec<FakeBuffer>,
    pub current: Option<usize>,
    pub registry: CommandRegistry,
    pub config: Config,
    pub info: Option<String>,
    pub error: Option<String>,
    pub active_dialog: Option<Box<dyn Dialog>>,
    /// Every name passed to `execute_command`
    pub executed: Vec<String>,
    /// Directories passed to `show_file_picker`
    pub file_pickers: Vec<PathBuf>,
    /// Number of `persist_current_buffer` calls
    pub persisted: usize,
    /// Number of `save_current_buffer_state` calls
    pub state_syncs: usize,
    pub cursor_state_saved: bool,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add a buffer and make it current.
    pub fn with_buffer(mut self, buffer: FakeBuffer) -> Self {
        self.buffers.push(buffer);
        self.current = Some(self.buffers.len() - 1);
        self
    }

    pub fn current_buffer(&self) -> Option<&FakeBuffer> {
        self.current.and_then(|idx| self.buffers.get(idx))
    }

    fn current_buffer_mut(&mut self) -> Option<&mut FakeBuffer> {
        self.current.and_then(move |idx| self.buffers.get_mut(idx))
    }

    /// Deliver a message to the active dialog, as the host would.
    pub fn send_to_dialog(&mut self, msg: &Message) -> Option<Action> {
        let dialog = self.active_dialog.take()?;
        let (dialog, action) = dialog.update(msg);
        if dialog.is_visible() {
            self.active_dialog = Some(dialog);
        }
        action
    }

    /// Perform an action the way the dispatch loop would, synchronously.
    ///
    /// Spawned jobs run inline and delayed messages are delivered at once,
    /// except blink ticks which are dropped. Returns true if the action
    /// asked to quit.
    pub fn perform(&mut self, action: Option<Action>) -> bool {
        let Some(action) = action else {
            return false;
        };
        match action {
            Action::Emit(msg) => self.dispatch(msg),
            Action::Spawn(job) => self.dispatch(job()),
            Action::After(_, Message::Blink(_)) => false,
            Action::After(_, msg) => self.dispatch(msg),
            Action::Batch(actions) => actions
                .into_iter()
                .fold(false, |quit, action| self.perform(Some(action)) || quit),
            Action::Quit => true,
        }
    }

    /// Route a message: plugin messages handle themselves, the rest go to
    /// the active dialog. Returns true if quitting was requested.
    pub fn dispatch(&mut self, msg: Message) -> bool {
        let action = match msg {
            Message::Plugin(plugin_msg) => plugin_msg.handle(self),
            other => self.send_to_dialog(&other),
        };
        self.perform(action)
    }
}

impl EditorContext for RecordingContext {
    fn current_file_path(&self) -> Option<PathBuf> {
        self.current_buffer().and_then(|b| b.path.clone())
    }

    fn is_current_buffer_read_only(&self) -> bool {
        self.current_buffer().is_some_and(|b| b.read_only)
    }

    fn current_content(&self) -> String {
        self.current_buffer()
            .map(|b| b.content.clone())
            .unwrap_or_default()
    }

    fn buffers(&self) -> Vec<BufferInfo> {
        self.buffers.iter().map(FakeBuffer::info).collect()
    }

    fn current_buffer_index(&self) -> Option<usize> {
        self.current
    }

    fn has_unsaved_changes(&self) -> bool {
        self.buffers.iter().any(|b| b.modified)
    }

    fn is_current_buffer_modified(&self) -> bool {
        self.current_buffer().is_some_and(|b| b.modified)
    }

    fn save_current_buffer_state(&mut self) {
        self.state_syncs += 1;
    }

    fn persist_current_buffer(&mut self) -> Option<Action> {
        self.persisted += 1;
        None
    }

    fn update_buffer_after_save(&mut self, path: &Path, content: String, _size: u64) {
        let saved = self.buffers.iter_mut().find(|b| b.path.as_deref() == Some(path));
        if let Some(buffer) = saved {
            buffer.modified = buffer.content != content;
        }
    }

    fn open_file(&mut self, path: &Path) -> Result<()> {
        if let Some(idx) = self.buffers.iter().position(|b| b.path.as_deref() == Some(path)) {
            self.current = Some(idx);
            return Ok(());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        self.buffers.push(FakeBuffer::new(path, content));
        self.current = Some(self.buffers.len() - 1);
        Ok(())
    }

    fn switch_to_buffer(&mut self, index: usize) {
        if index < self.buffers.len() {
            self.current = Some(index);
        }
    }

    fn close_current_buffer(&mut self) -> bool {
        let Some(idx) = self.current else {
            return true;
        };
        self.buffers.remove(idx);
        if self.buffers.is_empty() {
            self.current = None;
            return true;
        }
        self.current = Some(idx.min(self.buffers.len() - 1));
        false
    }

    fn set_cursor_position(&mut self, line: usize, col: usize) {
        if let Some(buffer) = self.current_buffer_mut() {
            buffer.cursor = (line, col);
        }
    }

    fn save_cursor_state(&mut self) {
        self.cursor_state_saved = true;
    }

    fn set_info(&mut self, message: String) {
        self.error = None;
        self.info = Some(message);
    }

    fn set_error(&mut self, message: String) {
        self.info = None;
        self.error = Some(message);
    }

    fn set_active_dialog(&mut self, mut dialog: Box<dyn Dialog>) -> Option<Action> {
        let init = dialog.init();
        self.active_dialog = Some(dialog);
        init
    }

    fn show_file_picker(&mut self, dir: &Path) -> Option<Action> {
        self.file_pickers.push(dir.to_path_buf());
        None
    }

    fn commands(&self) -> Vec<CommandDescriptor> {
        self.registry.list()
    }

    fn execute_command(&mut self, name: &str) -> Option<Action> {
        self.executed.push(name.to_string());
        let execute = self.registry.get(name).and_then(|c| c.execute.clone());
        execute.and_then(|execute| execute(self))
    }

    fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;

    #[test]
    fn test_status_messages_replace_each_other() {
        let mut ctx = RecordingContext::new();
        ctx.set_error("boom".into());
        ctx.set_info("fine".into());
        assert_eq!(ctx.info.as_deref(), Some("fine"));
        assert!(ctx.error.is_none());
    }

    #[test]
    fn test_execute_command_runs_closure() {
        let mut builder = RegistryBuilder::new();
        builder.register(
            CommandDescriptor::new("hello", "", "").with_execute(|ctx| {
                ctx.set_info("hello".into());
                None
            }),
        );
        let mut ctx = RecordingContext::new().with_registry(builder.build());

        assert!(ctx.execute_command("hello").is_none());
        assert_eq!(ctx.info.as_deref(), Some("hello"));
    }

    #[test]
    fn test_execute_unknown_command_is_a_no_op() {
        let mut ctx = RecordingContext::new();
        assert!(ctx.execute_command("nope").is_none());
        assert!(ctx.info.is_none());
        assert!(ctx.error.is_none());
    }

    #[test]
    fn test_close_reports_last_buffer() {
        let mut ctx = RecordingContext::new()
            .with_buffer(FakeBuffer::new("a.txt", "a"))
            .with_buffer(FakeBuffer::new("b.txt", "b"));
        assert!(!ctx.close_current_buffer());
        assert_eq!(ctx.current_file_path(), Some(PathBuf::from("a.txt")));
        assert!(ctx.close_current_buffer());
        assert!(ctx.current_buffer_index().is_none());
    }

    #[test]
    fn test_open_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "remember").unwrap();

        let mut ctx = RecordingContext::new();
        ctx.open_file(&path).unwrap();
        assert_eq!(ctx.current_content(), "remember");
        assert!(ctx.open_file(&dir.path().join("missing.txt")).is_err());
    }
}
