//! `help-show`: the command palette.

use macro_core::{Action, CommandDescriptor, EditorContext, KeyBinding, Plugin, RegistryBuilder};
use macro_dialog::PaletteDialog;

pub const CMD_HELP: &str = "help-show";

pub struct HelpPlugin;

impl Plugin for HelpPlugin {
    fn name(&self) -> &'static str {
        "help"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_HELP, "Ctrl-Space", "Show command palette")
                .with_binding(KeyBinding::single("ctrl+space"))
                .with_execute(execute_help),
        );
    }
}

fn execute_help(ctx: &mut dyn EditorContext) -> Option<Action> {
    let palette = PaletteDialog::new(ctx.commands(), ctx.config().palette.clone());
    ctx.set_active_dialog(Box::new(palette))
}
