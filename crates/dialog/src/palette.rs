//! Command palette: every registered command, fuzzy-filtered as you type.

use macro_config::PaletteSettings;
use macro_core::{Action, CommandDescriptor, Dialog, EditorContext, Message, PluginMessage};
use macro_ui::{pad_right, TextInput};

use crate::frame::{row_prefix, schedule_blink, DialogFrame, ListKeys, FILTER_LABEL};
use crate::fuzzy_list::FuzzyList;

const INSTRUCTIONS: &str = "↑/↓: Navigate | Enter: Run Command | Esc: Close";

/// Sent when a command is picked from the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSelected {
    pub name: String,
}

impl PluginMessage for CommandSelected {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        macro_logger::info(format!("Palette: running '{}'", self.name));
        ctx.execute_command(&self.name)
    }
}

/// Command palette dialog.
#[derive(Debug)]
pub struct PaletteDialog {
    input: TextInput,
    commands: FuzzyList<CommandDescriptor>,
    keys: ListKeys,
    settings: PaletteSettings,
    visible: bool,
}

impl PaletteDialog {
    /// Open over a snapshot of `commands`.
    pub fn new(commands: Vec<CommandDescriptor>, settings: PaletteSettings) -> Self {
        let input = TextInput::new()
            .with_placeholder("Type to filter commands...")
            .with_char_limit(100)
            .with_width(50);
        Self {
            input,
            commands: FuzzyList::new(commands, |c| format!("{} {}", c.name, c.description)),
            keys: ListKeys::closing_on(["ctrl+space"]),
            settings,
            visible: true,
        }
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn selected_index(&self) -> usize {
        self.commands.selected_index()
    }

    /// Names of the commands currently listed, best match first.
    pub fn filtered_names(&self) -> Vec<&str> {
        self.commands.filtered().map(|c| c.name.as_str()).collect()
    }

    pub fn input_width(&self) -> usize {
        self.input.width()
    }

    fn row(command: &CommandDescriptor) -> String {
        format!(
            "{} {} {}",
            pad_right(&command.name, 20),
            pad_right(&command.key, 12),
            command.description
        )
    }

    fn resize(&mut self, width: u16, height: u16) {
        let frame = DialogFrame::for_terminal(width, height, &self.settings);
        self.input.set_width(frame.input_width());
    }

    fn dismiss(&mut self) {
        self.visible = false;
        self.input.blur();
    }

    fn on_key(&mut self, key: &crossterm::event::KeyEvent) -> Option<Action> {
        if self.keys.close.matches(key) {
            self.dismiss();
            return None;
        }
        if self.keys.enter.matches(key) {
            let name = self.commands.selected()?.name.clone();
            self.dismiss();
            return Some(Action::plugin(CommandSelected { name }));
        }
        if self.keys.up.matches(key) {
            self.commands.move_up();
            return None;
        }
        if self.keys.down.matches(key) {
            self.commands.move_down();
            return None;
        }
        if self.input.handle_key(key) {
            self.commands.set_query(self.input.text());
        }
        None
    }
}

impl Dialog for PaletteDialog {
    fn init(&mut self) -> Option<Action> {
        self.input.focus();
        Some(schedule_blink(&self.input))
    }

    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Dialog>, Option<Action>) {
        if !self.visible {
            return (self, None);
        }
        let action = match msg {
            Message::Key(key) => self.on_key(key),
            Message::Resize { width, height } => {
                self.resize(*width, *height);
                None
            }
            Message::Blink(id) if *id == self.input.id() => {
                self.input.blink().then(|| schedule_blink(&self.input))
            }
            _ => None,
        };
        (self, action)
    }

    fn view(&self, width: u16, height: u16) -> String {
        if !self.visible {
            return String::new();
        }
        let frame = DialogFrame::for_terminal(width, height, &self.settings);
        let selected = self.commands.selected_index();
        let rows = self
            .commands
            .visible(frame.list_height)
            .map(|(pos, command)| format!("{}{}", row_prefix(pos == selected), Self::row(command)));
        let title = format!(
            "Command Palette ({}/{} commands)",
            self.commands.filtered_len(),
            self.commands.total_len()
        );
        frame.compose(&title, rows, FILTER_LABEL, &self.input, INSTRUCTIONS)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
