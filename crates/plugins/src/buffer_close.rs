//! `buffer-close`: close the current buffer.
//!
//! Closing the last buffer opens the file picker where that buffer's file
//! lived, so there is always something to pick next.

use std::path::PathBuf;

use macro_core::{
    Action, CommandDescriptor, EditorContext, KeyBinding, Plugin, PluginMessage, RegistryBuilder,
};
use macro_dialog::ConfirmDialog;

pub const CMD_BUFFER_CLOSE: &str = "buffer-close";

pub struct BufferClosePlugin;

impl Plugin for BufferClosePlugin {
    fn name(&self) -> &'static str {
        "buffer-close"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_BUFFER_CLOSE, "Ctrl-W", "Close current buffer")
                .with_binding(KeyBinding::single("ctrl+w"))
                .with_execute(execute_buffer_close),
        );
    }
}

fn current_dir(ctx: &dyn EditorContext) -> PathBuf {
    ctx.current_file_path()
        .map(|path| macro_ui::parent_dir(&path))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn execute_buffer_close(ctx: &mut dyn EditorContext) -> Option<Action> {
    if ctx.is_current_buffer_modified() {
        let dialog = ConfirmDialog::new(
            "Unsaved Changes",
            "This buffer has unsaved changes. Close anyway?",
            "close",
            BufferCloseConfirmed {
                dir: current_dir(ctx),
            },
        );
        return ctx.set_active_dialog(Box::new(dialog));
    }
    let dir = current_dir(ctx);
    close_now(ctx, dir)
}

fn close_now(ctx: &mut dyn EditorContext, dir: PathBuf) -> Option<Action> {
    if ctx.close_current_buffer() {
        macro_logger::info("Last buffer closed");
        ctx.set_info("Last buffer closed. Select a file to open.".to_string());
        return ctx.show_file_picker(&dir);
    }
    ctx.set_info("Buffer closed".to_string());
    None
}

/// Sent when the user confirms closing a modified buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferCloseConfirmed {
    /// Where to open the file picker if this was the last buffer
    pub dir: PathBuf,
}

impl PluginMessage for BufferCloseConfirmed {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        close_now(ctx, self.dir)
    }
}
