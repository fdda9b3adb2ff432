//! Yes/No confirmation dialog.

use macro_core::{Action, Dialog, Message, PluginMessage};
use macro_keyboard::KeyBinding;
use macro_ui::fit_to_width;

/// Preferred content width; narrower terminals shrink it.
const CONTENT_WIDTH: usize = 46;

/// Confirmation dialog emitting a message when the user answers yes.
#[derive(Debug)]
pub struct ConfirmDialog {
    title: String,
    message: String,
    yes_label: String,
    on_confirm: Option<Box<dyn PluginMessage>>,
    yes: KeyBinding,
    no: KeyBinding,
    visible: bool,
}

impl ConfirmDialog {
    /// `yes_label` completes "[Y] Yes, ..." in the instructions.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        yes_label: impl Into<String>,
        on_confirm: impl PluginMessage + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            yes_label: yes_label.into(),
            on_confirm: Some(Box::new(on_confirm)),
            yes: KeyBinding::new(["y", "Y"]),
            no: KeyBinding::new(["n", "N", "esc", "ctrl+c"]),
            visible: true,
        }
    }
}

impl Dialog for ConfirmDialog {
    fn init(&mut self) -> Option<Action> {
        None
    }

    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Dialog>, Option<Action>) {
        let Message::Key(key) = msg else {
            return (self, None);
        };
        if !self.visible {
            return (self, None);
        }
        if self.yes.matches(key) {
            self.visible = false;
            let action = self.on_confirm.take().map(|msg| Action::Emit(Message::Plugin(msg)));
            return (self, action);
        }
        if self.no.matches(key) {
            self.visible = false;
        }
        (self, None)
    }

    fn view(&self, width: u16, _height: u16) -> String {
        if !self.visible {
            return String::new();
        }
        // Box stays 4 columns inside the terminal, content 4 inside the box
        let width = CONTENT_WIDTH.min((width as usize).saturating_sub(8)).max(1);
        let yes = format!("[Y] Yes, {}", self.yes_label);
        let instructions = format!("{:<20} {}", yes, "[N/Esc] No, cancel");
        [
            fit_to_width(&self.title, width),
            "─".repeat(width),
            String::new(),
            fit_to_width(&self.message, width),
            String::new(),
            fit_to_width(&instructions, width),
        ]
        .join("\n")
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
