//! `goto-line`: jump to `LINE` or `LINE:COL`, or search lines by content.

use crossterm::event::KeyEvent;
use macro_config::PaletteSettings;
use macro_core::{
    Action, CommandDescriptor, Dialog, EditorContext, KeyBinding, Message, Plugin, PluginMessage,
    RegistryBuilder,
};
use macro_dialog::{row_prefix, schedule_blink, DialogFrame, FuzzyList, ListKeys};
use macro_ui::TextInput;

pub const CMD_GOTO_LINE: &str = "goto-line";

const INSTRUCTIONS: &str = "↑/↓: Navigate | Enter: Go to Line | Esc: Close";
const LINE_LABEL: &str = "Line: ";
/// Lines shown on each side of a typed line number.
const CONTEXT_LINES: usize = 5;

pub struct GotoPlugin;

impl Plugin for GotoPlugin {
    fn name(&self) -> &'static str {
        "goto"
    }

    fn register(&self, registry: &mut RegistryBuilder) {
        registry.register(
            CommandDescriptor::new(CMD_GOTO_LINE, "Ctrl-G", "Go to line number or list all lines")
                .with_binding(KeyBinding::single("ctrl+g"))
                .with_execute(execute_goto),
        );
    }
}

fn execute_goto(ctx: &mut dyn EditorContext) -> Option<Action> {
    let dialog = GotoDialog::new(&ctx.current_content(), ctx.config().palette.clone());
    ctx.set_active_dialog(Box::new(dialog))
}

/// Sent when a line is picked. Both numbers are 1-based; a column of 0
/// means the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GotoLine {
    pub line: usize,
    pub col: usize,
}

impl PluginMessage for GotoLine {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        ctx.set_cursor_position(self.line.saturating_sub(1), self.col.saturating_sub(1));
        None
    }
}

/// Parse `LINE` or `LINE:COL`. The line must be a positive number; a
/// missing or invalid column is 0.
pub fn parse_line_col(input: &str) -> Option<(usize, usize)> {
    let mut parts = input.split(':');
    let line: usize = parts.next()?.parse().ok().filter(|&l| l > 0)?;
    let col = parts.next().and_then(|c| c.parse().ok()).unwrap_or(0);
    Some((line, col))
}

fn is_line_number_query(query: &str) -> bool {
    query
        .split(':')
        .next()
        .is_some_and(|first| first.parse::<i64>().is_ok())
}

#[derive(Debug, Clone)]
struct LineItem {
    number: usize,
    content: String,
}

#[derive(Debug)]
pub struct GotoDialog {
    input: TextInput,
    lines: FuzzyList<LineItem>,
    keys: ListKeys,
    settings: PaletteSettings,
    visible: bool,
}

impl GotoDialog {
    pub fn new(content: &str, settings: PaletteSettings) -> Self {
        let lines = content
            .split('\n')
            .enumerate()
            .map(|(idx, line)| LineItem {
                number: idx + 1,
                content: line.trim_end_matches('\r').to_string(),
            })
            .collect();
        let input = TextInput::new()
            .with_placeholder("Type line number (e.g., 10 or 10:5)...")
            .with_char_limit(20)
            .with_width(50);
        Self {
            input,
            lines: FuzzyList::new(lines, |l| l.content.clone()),
            keys: ListKeys::closing_on(["ctrl+g"]),
            settings,
            visible: true,
        }
    }

    /// Line numbers currently listed.
    pub fn filtered_lines(&self) -> Vec<usize> {
        self.lines.filtered().map(|l| l.number).collect()
    }

    pub fn selected_line(&self) -> Option<usize> {
        self.lines.selected().map(|l| l.number)
    }

    fn apply_filter(&mut self) {
        let query = self.input.text().to_string();
        if is_line_number_query(&query) {
            if let Some((line, _)) = parse_line_col(&query) {
                let total = self.lines.total_len();
                let end = (line + CONTEXT_LINES).min(total);
                let start = line.saturating_sub(CONTEXT_LINES + 1).min(end);
                let selected = (line - 1).saturating_sub(start);
                let selected = if line <= end { selected } else { 0 };
                self.lines.show_only(&query, (start..end).collect(), selected);
                return;
            }
        }
        self.lines.set_query(&query);
    }

    fn on_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if self.keys.close.matches(key) {
            self.visible = false;
            return None;
        }
        if self.keys.enter.matches(key) {
            let target = match parse_line_col(self.input.text()) {
                Some((line, col)) => GotoLine { line, col },
                None => GotoLine {
                    line: self.lines.selected()?.number,
                    col: 0,
                },
            };
            self.visible = false;
            return Some(Action::plugin(target));
        }
        if self.keys.up.matches(key) {
            self.lines.move_up();
        } else if self.keys.down.matches(key) {
            self.lines.move_down();
        } else if self.input.handle_key(key) {
            self.apply_filter();
        }
        None
    }
}

impl Dialog for GotoDialog {
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
        let selected = self.lines.selected_index();
        let rows = self.lines.visible(frame.list_height).map(|(pos, line)| {
            format!(
                "{}{:>4}: {}",
                row_prefix(pos == selected),
                line.number,
                line.content
            )
        });
        let title = format!("Go to Line ({} lines)", self.lines.total_len());
        frame.compose(&title, rows, LINE_LABEL, &self.input, INSTRUCTIONS)
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

    fn numbered(count: usize) -> String {
        (1..=count)
            .map(|n| format!("line {}", n))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_line_col() {
        assert_eq!(parse_line_col("10"), Some((10, 0)));
        assert_eq!(parse_line_col("10:5"), Some((10, 5)));
        assert_eq!(parse_line_col("10:x"), Some((10, 0)));
        assert_eq!(parse_line_col("0"), None);
        assert_eq!(parse_line_col("abc"), None);
        assert_eq!(parse_line_col(""), None);
    }

    #[test]
    fn test_number_shows_context_window() {
        let mut dialog = GotoDialog::new(&numbered(30), PaletteSettings::default());
        dialog.input.set_text("12");
        dialog.apply_filter();
        assert_eq!(dialog.filtered_lines(), (7..=17).collect::<Vec<_>>());
        assert_eq!(dialog.selected_line(), Some(12));
    }

    #[test]
    fn test_number_near_start_clamps() {
        let mut dialog = GotoDialog::new(&numbered(30), PaletteSettings::default());
        dialog.input.set_text("2");
        dialog.apply_filter();
        assert_eq!(dialog.filtered_lines(), (1..=7).collect::<Vec<_>>());
        assert_eq!(dialog.selected_line(), Some(2));
    }

    #[test]
    fn test_number_past_end_lists_nothing() {
        let mut dialog = GotoDialog::new(&numbered(5), PaletteSettings::default());
        dialog.input.set_text("40");
        dialog.apply_filter();
        assert!(dialog.filtered_lines().is_empty());
    }

    #[test]
    fn test_text_query_searches_content() {
        let content = "fn main() {\n    let total = 1;\n}\n";
        let mut dialog = GotoDialog::new(content, PaletteSettings::default());
        dialog.input.set_text("total");
        dialog.apply_filter();
        assert_eq!(dialog.filtered_lines(), vec![2]);
    }

    #[test]
    fn test_enter_emits_typed_position() {
        let mut ctx =
            RecordingContext::new().with_buffer(FakeBuffer::new("a.txt", numbered(30)));
        execute_goto(&mut ctx);
        for c in "12:4".chars() {
            ctx.send_to_dialog(&key(KeyCode::Char(c)));
        }
        let action = ctx.send_to_dialog(&key(KeyCode::Enter));
        ctx.perform(action);
        assert_eq!(ctx.current_buffer().unwrap().cursor, (11, 3));
        assert!(ctx.active_dialog.is_none());
    }

    #[test]
    fn test_enter_on_search_uses_selected_line() {
        let content = "alpha\nbeta\ngamma";
        let mut ctx = RecordingContext::new().with_buffer(FakeBuffer::new("a.txt", content));
        execute_goto(&mut ctx);
        for c in "gam".chars() {
            ctx.send_to_dialog(&key(KeyCode::Char(c)));
        }
        let action = ctx.send_to_dialog(&key(KeyCode::Enter));
        ctx.perform(action);
        assert_eq!(ctx.current_buffer().unwrap().cursor, (2, 0));
    }

    #[test]
    fn test_view_rows_are_numbered() {
        let dialog = GotoDialog::new("first\nsecond", PaletteSettings::default());
        let view = dialog.view(100, 30);
        assert!(view.starts_with("Go to Line (2 lines)"));
        assert!(view.contains(">    1: first"));
        assert!(view.contains("     2: second"));
        assert!(view.contains("Line: "));
    }

    #[test]
    fn test_toggle_key_closes() {
        let dialog: Box<dyn Dialog> = Box::new(GotoDialog::new("x", PaletteSettings::default()));
        let ctrl_g = Message::Key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));
        let (dialog, action) = dialog.update(&ctrl_g);
        assert!(!dialog.is_visible());
        assert!(action.is_none());
    }
}
