//! `file-open`: pick a file next to the current one.

use macro_core::{Action, CommandDescriptor, EditorContext, KeyBinding, Plugin, RegistryBuilder};

pub const CMD_FILE_OPEN: &str = "file-open";

pub struct FileSwitcherPlugin;

impl Plugin for FileSwitcherPlugin {
    fn name(&self) -> &'static str {
        "file-switcher"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_FILE_OPEN, "Ctrl-P", "Open file switcher")
                .with_binding(KeyBinding::single("ctrl+p"))
                .with_execute(execute_file_open),
        );
    }
}

fn execute_file_open(ctx: &mut dyn EditorContext) -> Option<Action> {
    let Some(path) = ctx.current_file_path() else {
        ctx.set_error("No file open to determine directory".to_string());
        return None;
    };
    let dir = macro_ui::parent_dir(&path);
    ctx.show_file_picker(&dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_core::testing::{FakeBuffer, RecordingContext};
    use std::path::PathBuf;

    #[test]
    fn test_opens_picker_in_current_directory() {
        let mut ctx = RecordingContext::new().with_buffer(FakeBuffer::new("/srv/app/main.rs", ""));
        execute_file_open(&mut ctx);
        assert_eq!(ctx.file_pickers, vec![PathBuf::from("/srv/app")]);
    }

    #[test]
    fn test_bare_file_name_uses_dot() {
        let mut ctx = RecordingContext::new().with_buffer(FakeBuffer::new("notes.txt", ""));
        execute_file_open(&mut ctx);
        assert_eq!(ctx.file_pickers, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_without_file_reports_error() {
        let mut ctx = RecordingContext::new();
        assert!(execute_file_open(&mut ctx).is_none());
        assert!(ctx.file_pickers.is_empty());
        assert_eq!(
            ctx.error.as_deref(),
            Some("No file open to determine directory")
        );
    }
}
