//! Single-line text input used by dialogs.
//!
//! Tracks the cursor in characters (not bytes) so multi-byte input edits
//! correctly, plus the focus and caret-blink state needed to render it as
//! plain text.

use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::text::{display_width, truncate_start_to_width, truncate_to_width};

/// Caret glyph drawn at the cursor while the blink phase is on.
pub const CARET: char = '█';

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Text input with cursor, focus and caret blink state.
#[derive(Debug, Clone)]
pub struct TextInput {
    id: u64,
    input: String,
    cursor_pos: usize, // Position in characters, not bytes
    placeholder: String,
    char_limit: usize,
    width: usize,
    focused: bool,
    caret_visible: bool,
}

impl TextInput {
    /// Create an empty, unfocused input.
    pub fn new() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            input: String::new(),
            cursor_pos: 0,
            placeholder: String::new(),
            char_limit: 0,
            width: 50,
            focused: false,
            caret_visible: true,
        }
    }

    /// Set the text shown while the input is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Limit the number of characters accepted (0 means unlimited).
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// Set the number of columns available for rendering.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Process-unique identifier, used to tag blink messages.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the current input text
    pub fn text(&self) -> &str {
        &self.input
    }

    /// Get the cursor position (in characters)
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Number of columns available for rendering.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Change the number of columns available for rendering.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Check if input is empty
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give the input keyboard focus and show the caret.
    pub fn focus(&mut self) {
        self.focused = true;
        self.caret_visible = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Flip the caret blink phase. Returns false when unfocused.
    pub fn blink(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.caret_visible = !self.caret_visible;
        true
    }

    /// Set the input text and move cursor to end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_pos = self.input.chars().count();
    }

    /// Clear all input
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    /// Convert cursor position (in characters) to byte index
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    /// Insert a character at the cursor position
    pub fn insert(&mut self, c: char) -> bool {
        if self.char_limit > 0 && self.input.chars().count() >= self.char_limit {
            return false;
        }
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor_pos += 1;
        true
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let byte_idx = self.byte_index();
            self.input.remove(byte_idx);
            true
        } else {
            false
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos < self.input.chars().count() {
            let byte_idx = self.byte_index();
            self.input.remove(byte_idx);
            true
        } else {
            false
        }
    }

    /// Delete everything before the cursor (ctrl+u)
    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let byte_idx = self.byte_index();
        self.input.replace_range(..byte_idx, "");
        self.cursor_pos = 0;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor_pos < self.input.chars().count() {
            self.cursor_pos += 1;
            true
        } else {
            false
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.input.chars().count();
    }

    /// Apply an editing key to the input.
    ///
    /// Returns true when the text changed. Cursor-only moves return false,
    /// as do keys the input does not handle and any key while unfocused.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }

        // Typing shows the caret immediately
        self.caret_visible = true;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.delete_to_start(),
            KeyCode::Char('a') if ctrl => {
                self.move_home();
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.move_end();
                false
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }

    /// Get text before cursor (for rendering)
    pub fn text_before_cursor(&self) -> &str {
        &self.input[..self.byte_index()]
    }

    /// Get text after cursor (for rendering)
    pub fn text_after_cursor(&self) -> &str {
        &self.input[self.byte_index()..]
    }

    /// Render the input as a single line of at most `width` columns.
    ///
    /// The caret replaces the character under the cursor while visible.
    /// When the text is wider than the field, it scrolls so the cursor
    /// stays in view.
    pub fn view(&self) -> String {
        let width = self.width.max(1);
        let show_caret = self.focused && self.caret_visible;

        if self.input.is_empty() {
            let mut line = String::new();
            let mut placeholder = self.placeholder.chars();
            if show_caret {
                line.push(CARET);
                placeholder.next();
            }
            line.push_str(placeholder.as_str());
            return truncate_to_width(&line, width).to_string();
        }

        let before = self.text_before_cursor();
        let mut after = self.text_after_cursor().chars();
        let under_cursor = after.next();

        // Keep the cursor cell in view by scrolling the prefix
        let before = truncate_start_to_width(before, width.saturating_sub(1));

        let mut line = String::from(before);
        match (show_caret, under_cursor) {
            (true, _) => line.push(CARET),
            (false, Some(ch)) => line.push(ch),
            (false, None) => {}
        }
        line.push_str(after.as_str());

        let line = truncate_to_width(&line, width);
        debug_assert!(display_width(line) <= width);
        line.to_string()
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}
