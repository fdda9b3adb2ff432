//! `file-save`: write the current buffer to its file.

use macro_core::{Action, CommandDescriptor, EditorContext, KeyBinding, Plugin, RegistryBuilder};

pub const CMD_SAVE: &str = "file-save";

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn name(&self) -> &'static str {
        "save"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_SAVE, "Ctrl-S", "Save current buffer to disk")
                .with_binding(KeyBinding::single("ctrl+s"))
                .with_execute(execute_save),
        );
    }
}

/// Refuses read-only and unnamed buffers; otherwise syncs the editing
/// state and hands the write to the editor.
fn execute_save(ctx: &mut dyn EditorContext) -> Option<Action> {
    if ctx.is_current_buffer_read_only() {
        ctx.set_info("WARNING: Cannot save - file is read-only".to_string());
        return None;
    }
    let Some(path) = ctx.current_file_path() else {
        ctx.set_error("Error: No filename specified. Usage: macro <filename>".to_string());
        return None;
    };
    macro_logger::debug(format!("Saving {}", path.display()));
    ctx.save_current_buffer_state();
    ctx.persist_current_buffer()
}
