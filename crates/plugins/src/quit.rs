//! `quit`: leave the editor, asking first when there are unsaved changes.

use macro_core::{
    Action, CommandDescriptor, EditorContext, KeyBinding, Plugin, PluginMessage, RegistryBuilder,
};
use macro_dialog::ConfirmDialog;

pub const CMD_QUIT: &str = "quit";

pub struct QuitPlugin;

impl Plugin for QuitPlugin {
    fn name(&self) -> &'static str {
        "quit"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_QUIT, "Ctrl-Q", "Quit the editor")
                .with_binding(KeyBinding::single("ctrl+q"))
                .with_execute(execute_quit),
        );
    }
}

fn execute_quit(ctx: &mut dyn EditorContext) -> Option<Action> {
    if ctx.has_unsaved_changes() {
        let dialog = ConfirmDialog::new(
            "Unsaved Changes",
            "You have unsaved changes. Quit anyway?",
            "quit",
            QuitConfirmed,
        );
        return ctx.set_active_dialog(Box::new(dialog));
    }
    quit_now(ctx)
}

fn quit_now(ctx: &mut dyn EditorContext) -> Option<Action> {
    ctx.save_current_buffer_state();
    ctx.save_cursor_state();
    macro_logger::info("Quitting");
    Some(Action::Quit)
}

/// Sent when the user confirms quitting with unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitConfirmed;

impl PluginMessage for QuitConfirmed {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        quit_now(ctx)
    }
}
