//! Layout shared by the list dialogs, plus caret blink scheduling.

use std::time::Duration;

use macro_config::constants::CARET_BLINK_INTERVAL_MS;
use macro_config::PaletteSettings;
use macro_core::{Action, Message};
use macro_keyboard::KeyBinding;
use macro_ui::{fit_to_width, TextInput};

/// Label in front of the filter input.
pub const FILTER_LABEL: &str = "Filter: ";

/// Rows taken by everything except the list: border, title, separator,
/// filter line and instructions.
const CHROME_ROWS: u16 = 6;

/// Columns taken by the border and padding.
const CHROME_COLS: u16 = 4;

/// Dialog geometry for a terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogFrame {
    /// Text columns inside border and padding
    pub width: usize,
    /// Rows available for list entries
    pub list_height: usize,
}

impl DialogFrame {
    /// Half the terminal, never below the configured minimum.
    pub fn for_terminal(width: u16, height: u16, settings: &PaletteSettings) -> Self {
        let dialog_width = (width / 2).max(settings.min_width);
        let dialog_height = (height / 2).max(settings.min_height);
        Self {
            width: dialog_width.saturating_sub(CHROME_COLS) as usize,
            list_height: dialog_height.saturating_sub(CHROME_ROWS) as usize,
        }
    }

    /// Width available to the filter input after its label.
    pub fn input_width(&self) -> usize {
        self.width.saturating_sub(FILTER_LABEL.len()).max(1)
    }

    /// Assemble a list dialog: title, separator, exactly `list_height`
    /// rows (blank-padded), labelled input line and instructions.
    pub fn compose(
        &self,
        title: &str,
        rows: impl IntoIterator<Item = String>,
        label: &str,
        input: &TextInput,
        instructions: &str,
    ) -> String {
        let mut lines = Vec::with_capacity(self.list_height + 4);
        lines.push(fit_to_width(title, self.width));
        lines.push("─".repeat(self.width));
        lines.extend(
            rows.into_iter()
                .take(self.list_height)
                .map(|row| fit_to_width(&row, self.width)),
        );
        while lines.len() < self.list_height + 2 {
            lines.push(" ".repeat(self.width));
        }
        lines.push(fit_to_width(
            &format!("{}{}", label, input.view()),
            self.width,
        ));
        lines.push(fit_to_width(instructions, self.width));
        lines.join("\n")
    }
}

/// Prefix of the selected row.
pub fn row_prefix(selected: bool) -> &'static str {
    if selected {
        "> "
    } else {
        "  "
    }
}

/// Schedule the next caret blink of `input`.
pub fn schedule_blink(input: &TextInput) -> Action {
    Action::After(
        Duration::from_millis(CARET_BLINK_INTERVAL_MS),
        Message::Blink(input.id()),
    )
}

/// Keys shared by the list dialogs.
#[derive(Debug, Clone)]
pub struct ListKeys {
    pub close: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub enter: KeyBinding,
}

impl ListKeys {
    /// Default keys, with extra chords that also close the dialog (the
    /// key that opened it, typically).
    pub fn closing_on<'a>(extra: impl IntoIterator<Item = &'a str>) -> Self {
        let close = ["esc", "ctrl+c"].into_iter().chain(extra);
        Self {
            close: KeyBinding::new(close),
            up: KeyBinding::new(["up", "ctrl+k"]),
            down: KeyBinding::new(["down", "ctrl+j"]),
            enter: KeyBinding::single("enter"),
        }
    }
}
