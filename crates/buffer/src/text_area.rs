//! Rope-backed editing widget: cursor movement, insertion, deletion and
//! scrolling for a single buffer.

use crossterm::event::{KeyCode, KeyEvent};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Cursor position in characters (0-based).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPos {
    pub line: usize,
    pub column: usize,
}

/// Text editing widget.
#[derive(Debug, Clone)]
pub struct TextArea {
    rope: Rope,
    cursor: CursorPos,
    /// First visible line
    top: usize,
    /// First visible display column
    left: usize,
    /// Rows moved by PageUp/PageDown
    page_height: usize,
    tab_size: usize,
    read_only: bool,
}

impl TextArea {
    pub fn new(text: &str, tab_size: usize) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: CursorPos::default(),
            top: 0,
            left: 0,
            page_height: 20,
            tab_size: tab_size.max(1),
            read_only: false,
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> CursorPos {
        self.cursor
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line text without its line ending.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let text = self.rope.line(line).to_string();
        strip_line_break(&text).to_string()
    }

    /// Line length in characters, line ending excluded.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }

    fn char_index(&self, pos: CursorPos) -> usize {
        self.rope.line_to_char(pos.line) + pos.column
    }

    /// Character offsets of grapheme starts in `line`, plus its length.
    fn boundaries(&self, line: usize) -> Vec<usize> {
        let text = self.line_text(line);
        let mut offsets = Vec::new();
        let mut chars = 0;
        for grapheme in text.graphemes(true) {
            offsets.push(chars);
            chars += grapheme.chars().count();
        }
        offsets.push(chars);
        offsets
    }

    fn prev_boundary(&self, line: usize, column: usize) -> usize {
        self.boundaries(line)
            .into_iter()
            .rev()
            .find(|&b| b < column)
            .unwrap_or(0)
    }

    fn next_boundary(&self, line: usize, column: usize) -> usize {
        let boundaries = self.boundaries(line);
        let end = boundaries.last().copied().unwrap_or(0);
        boundaries.into_iter().find(|&b| b > column).unwrap_or(end)
    }

    /// Move the cursor, clamping to the text.
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let column = column.min(self.line_len(line));
        self.cursor = CursorPos { line, column };
    }

    // Editing

    /// Insert text at the cursor. Returns false for read-only text.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if self.read_only || text.is_empty() {
            return false;
        }
        let idx = self.char_index(self.cursor);
        self.rope.insert(idx, text);
        match text.rfind('\n') {
            Some(pos) => {
                self.cursor.line += text.matches('\n').count();
                self.cursor.column = text[pos + 1..].chars().count();
            }
            None => self.cursor.column += text.chars().count(),
        }
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_str("\n")
    }

    /// Insert spaces up to the next tab stop.
    pub fn insert_tab(&mut self) -> bool {
        let spaces = self.tab_size - self.cursor.column % self.tab_size;
        self.insert_str(&" ".repeat(spaces))
    }

    fn remove(&mut self, start: usize, end: usize) {
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Delete the grapheme before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let CursorPos { line, column } = self.cursor;
        if column > 0 {
            let prev = self.prev_boundary(line, column);
            let line_start = self.rope.line_to_char(line);
            self.remove(line_start + prev, line_start + column);
            self.cursor.column = prev;
            return true;
        }
        if line == 0 {
            return false;
        }
        let prev_len = self.line_len(line - 1);
        let start = self.rope.line_to_char(line - 1) + prev_len;
        let end = self.rope.line_to_char(line);
        self.remove(start, end);
        self.cursor = CursorPos {
            line: line - 1,
            column: prev_len,
        };
        true
    }

    /// Delete the grapheme under the cursor, joining lines at line end.
    pub fn delete(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let CursorPos { line, column } = self.cursor;
        let line_start = self.rope.line_to_char(line);
        if column < self.line_len(line) {
            let next = self.next_boundary(line, column);
            self.remove(line_start + column, line_start + next);
            return true;
        }
        if line + 1 >= self.line_count() {
            return false;
        }
        let end = self.rope.line_to_char(line + 1);
        self.remove(line_start + column, end);
        true
    }

    // Movement

    pub fn move_left(&mut self) {
        let CursorPos { line, column } = self.cursor;
        if column > 0 {
            self.cursor.column = self.prev_boundary(line, column);
        } else if line > 0 {
            self.cursor = CursorPos {
                line: line - 1,
                column: self.line_len(line - 1),
            };
        }
    }

    pub fn move_right(&mut self) {
        let CursorPos { line, column } = self.cursor;
        if column < self.line_len(line) {
            self.cursor.column = self.next_boundary(line, column);
        } else if line + 1 < self.line_count() {
            self.cursor = CursorPos {
                line: line + 1,
                column: 0,
            };
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.set_cursor(self.cursor.line - 1, self.cursor.column);
        }
    }

    pub fn move_down(&mut self) {
        self.set_cursor(self.cursor.line + 1, self.cursor.column);
    }

    pub fn move_home(&mut self) {
        self.cursor.column = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.column = self.line_len(self.cursor.line);
    }

    pub fn page_up(&mut self) {
        let line = self.cursor.line.saturating_sub(self.page_height);
        self.set_cursor(line, self.cursor.column);
    }

    pub fn page_down(&mut self) {
        self.set_cursor(self.cursor.line + self.page_height, self.cursor.column);
    }

    /// Apply an editing key. Returns true if the key was handled.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(ch) = macro_keyboard::is_text_input(key) {
            self.insert_char(ch);
            return true;
        }
        match key.code {
            KeyCode::Enter => {
                self.insert_newline();
            }
            KeyCode::Tab => {
                self.insert_tab();
            }
            KeyCode::Backspace => {
                self.backspace();
            }
            KeyCode::Delete => {
                self.delete();
            }
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => return false,
        }
        true
    }

    // Rendering

    /// Line as displayed: tabs expanded to the next tab stop.
    pub fn display_line(&self, line: usize) -> String {
        expand_tabs(&self.line_text(line), self.tab_size)
    }

    /// Display column of the cursor within its line.
    pub fn cursor_display_column(&self) -> usize {
        let prefix: String = self
            .line_text(self.cursor.line)
            .chars()
            .take(self.cursor.column)
            .collect();
        display_width(&expand_tabs(&prefix, self.tab_size))
    }

    /// Adjust the scroll offsets so the cursor fits in a `width` x `height`
    /// viewport.
    pub fn scroll_into_view(&mut self, width: usize, height: usize) {
        self.page_height = height.max(1);
        let line = self.cursor.line;
        if line < self.top {
            self.top = line;
        } else if height > 0 && line >= self.top + height {
            self.top = line + 1 - height;
        }

        let col = self.cursor_display_column();
        if col < self.left {
            self.left = col;
        } else if width > 0 && col >= self.left + width {
            self.left = col + 1 - width;
        }
    }

    /// Visible part of the text, one string per row.
    pub fn visible_lines(&self, width: usize, height: usize) -> Vec<String> {
        (self.top..self.top + height)
            .take_while(|&line| line < self.line_count())
            .map(|line| slice_columns(&self.display_line(line), self.left, width))
            .collect()
    }
}

/// Characters ropey treats as line breaks, CRLF aside.
const LINE_BREAKS: [char; 7] = [
    '\n', '\u{0B}', '\u{0C}', '\r', '\u{85}', '\u{2028}', '\u{2029}',
];

/// `line` without its trailing line break.
fn strip_line_break(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    line.strip_suffix(LINE_BREAKS).unwrap_or(line)
}

fn display_width(text: &str) -> usize {
    text.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = tab_size - col % tab_size;
            out.extend(std::iter::repeat(' ').take(spaces));
            col += spaces;
        } else {
            out.push(ch);
            col += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    out
}

/// Columns `left..left + width` of `text`. Wide characters cut by the left
/// edge are dropped.
fn slice_columns(text: &str, left: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if col >= left && col + w <= left + width {
            out.push(ch);
        }
        col += w;
        if col >= left + width {
            break;
        }
    }
    out
}
