//! `buffer-switch`: fuzzy-filtered list of the open buffers.

use crossterm::event::KeyEvent;
use macro_config::PaletteSettings;
use macro_core::{
    Action, BufferInfo, CommandDescriptor, Dialog, EditorContext, KeyBinding, Message, Plugin,
    PluginMessage, RegistryBuilder,
};
use macro_dialog::{row_prefix, schedule_blink, DialogFrame, FuzzyList, ListKeys, FILTER_LABEL};
use macro_ui::TextInput;

pub const CMD_BUFFER_SWITCH: &str = "buffer-switch";

const INSTRUCTIONS: &str = "↑/↓: Navigate | Enter: Switch | Esc: Close";

pub struct BufferSwitcherPlugin;

impl Plugin for BufferSwitcherPlugin {
    fn name(&self) -> &'static str {
        "buffer-switcher"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_BUFFER_SWITCH, "Ctrl-B", "Open buffer switcher dialog")
                .with_binding(KeyBinding::single("ctrl+b"))
                .with_execute(execute_buffer_switch),
        );
    }
}

fn execute_buffer_switch(ctx: &mut dyn EditorContext) -> Option<Action> {
    let buffers = ctx.buffers();
    if buffers.is_empty() {
        ctx.set_error("No buffers open".to_string());
        return None;
    }
    let dialog = BufferSwitcherDialog::new(
        &buffers,
        ctx.current_buffer_index(),
        ctx.config().palette.clone(),
    );
    ctx.set_active_dialog(Box::new(dialog))
}

/// Sent when a buffer is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSelected {
    pub index: usize,
}

impl PluginMessage for BufferSelected {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        ctx.switch_to_buffer(self.index);
        ctx.set_info("Switched to buffer".to_string());
        None
    }
}

#[derive(Debug, Clone)]
struct BufferItem {
    name: String,
    index: usize,
}

/// Label of an open buffer: file name, ` [RO]` when read-only, `* ` in
/// front of the current one.
fn label(info: &BufferInfo, current: bool) -> String {
    let mut name = info
        .path
        .as_deref()
        .map(macro_ui::file_name_or_untitled)
        .unwrap_or_else(|| "Untitled".to_string());
    if info.read_only {
        name.push_str(" [RO]");
    }
    if current {
        name.insert_str(0, "* ");
    }
    name
}

#[derive(Debug)]
pub struct BufferSwitcherDialog {
    input: TextInput,
    buffers: FuzzyList<BufferItem>,
    keys: ListKeys,
    settings: PaletteSettings,
    visible: bool,
}

impl BufferSwitcherDialog {
    pub fn new(buffers: &[BufferInfo], current: Option<usize>, settings: PaletteSettings) -> Self {
        let items = buffers
            .iter()
            .enumerate()
            .map(|(index, info)| BufferItem {
                name: label(info, current == Some(index)),
                index,
            })
            .collect();
        let input = TextInput::new()
            .with_placeholder("Type to filter buffers...")
            .with_char_limit(100)
            .with_width(50);
        Self {
            input,
            buffers: FuzzyList::new(items, |b| b.name.clone()),
            keys: ListKeys::closing_on(["ctrl+b"]),
            settings,
            visible: true,
        }
    }

    /// Labels of the buffers currently listed.
    pub fn filtered_names(&self) -> Vec<&str> {
        self.buffers.filtered().map(|b| b.name.as_str()).collect()
    }

    fn on_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if self.keys.close.matches(key) {
            self.visible = false;
            return None;
        }
        if self.keys.enter.matches(key) {
            let index = self.buffers.selected()?.index;
            self.visible = false;
            return Some(Action::plugin(BufferSelected { index }));
        }
        if self.keys.up.matches(key) {
            self.buffers.move_up();
        } else if self.keys.down.matches(key) {
            self.buffers.move_down();
        } else if self.input.handle_key(key) {
            self.buffers.set_query(self.input.text());
        }
        None
    }
}

impl Dialog for BufferSwitcherDialog {
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
                let frame = DialogFrame::for_terminal(*width, *height, &self.settings);
                self.input.set_width(frame.input_width());
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
        let selected = self.buffers.selected_index();
        let rows = self
            .buffers
            .visible(frame.list_height)
            .map(|(pos, buffer)| format!("{}{}", row_prefix(pos == selected), buffer.name));
        let title = format!(
            "Buffer Switcher ({}/{} buffers)",
            self.buffers.filtered_len(),
            self.buffers.total_len()
        );
        frame.compose(&title, rows, FILTER_LABEL, &self.input, INSTRUCTIONS)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use macro_core::testing::{FakeBuffer, RecordingContext};

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn three_buffers() -> RecordingContext {
        RecordingContext::new()
            .with_buffer(FakeBuffer::new("src/main.rs", "fn main() {}"))
            .with_buffer(FakeBuffer::new("Cargo.toml", "[package]").read_only())
            .with_buffer(FakeBuffer::new("README.md", "# macro"))
    }

    #[test]
    fn test_labels_mark_current_and_read_only() {
        let mut ctx = three_buffers();
        ctx.switch_to_buffer(0);
        execute_buffer_switch(&mut ctx);
        let view = ctx.active_dialog.as_ref().unwrap().view(100, 30);
        assert!(view.starts_with("Buffer Switcher (3/3 buffers)"));
        assert!(view.contains("> * main.rs"));
        assert!(view.contains("  Cargo.toml [RO]"));
    }

    #[test]
    fn test_no_buffers_reports_error() {
        let mut ctx = RecordingContext::new();
        assert!(execute_buffer_switch(&mut ctx).is_none());
        assert!(ctx.active_dialog.is_none());
        assert_eq!(ctx.error.as_deref(), Some("No buffers open"));
    }

    #[test]
    fn test_filter_then_switch() {
        let mut ctx = three_buffers();
        execute_buffer_switch(&mut ctx);
        for c in "readme".chars() {
            ctx.send_to_dialog(&key(KeyCode::Char(c)));
        }
        let action = ctx.send_to_dialog(&key(KeyCode::Enter));
        ctx.perform(action);
        assert_eq!(ctx.current_buffer_index(), Some(2));
        assert_eq!(ctx.info.as_deref(), Some("Switched to buffer"));
        assert!(ctx.active_dialog.is_none());
    }

    #[test]
    fn test_navigate_and_switch() {
        let mut ctx = three_buffers();
        execute_buffer_switch(&mut ctx);
        ctx.send_to_dialog(&key(KeyCode::Down));
        let action = ctx.send_to_dialog(&key(KeyCode::Enter));
        ctx.perform(action);
        assert_eq!(ctx.current_buffer_index(), Some(1));
    }

    #[test]
    fn test_no_match_enter_does_nothing() {
        let mut ctx = three_buffers();
        execute_buffer_switch(&mut ctx);
        for c in "zzz".chars() {
            ctx.send_to_dialog(&key(KeyCode::Char(c)));
        }
        assert!(ctx.send_to_dialog(&key(KeyCode::Enter)).is_none());
        assert!(ctx.active_dialog.is_some());
    }
}
