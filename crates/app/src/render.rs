//! Drawing the editor: text area, status bar, message line and the
//! active dialog on top.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use macro_core::EditorContext;
use macro_dialog::row_prefix;
use macro_ui::{centered_rect, display_width, file_name_or_untitled, format_bytes};

use crate::state::AppState;

/// Render the whole screen
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Text
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Message line
        ])
        .split(frame.area());

    render_editor(frame, chunks[0], state);
    render_status_bar(frame, chunks[1], state);
    render_message(frame, chunks[2], state);
    render_dialog(frame, state);
}

fn render_editor(frame: &mut Frame, area: Rect, state: &mut AppState) {
    if state.current.is_none() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "macro - Select a file",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(hint, area);
        return;
    }

    let (width, height) = (area.width as usize, area.height as usize);
    state.editor.scroll_into_view(width, height);
    let lines: Vec<Line> = state
        .editor
        .visible_lines(width, height)
        .into_iter()
        .map(Line::from)
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if state.active_dialog.is_none() {
        let cursor = state.editor.cursor();
        let x = state
            .editor
            .cursor_display_column()
            .saturating_sub(state.editor.left());
        let y = cursor.line.saturating_sub(state.editor.top());
        frame.set_cursor_position((area.x + x as u16, area.y + y as u16));
    }
}

/// Left side of the status bar: `name[*] | size [| read-only]`.
pub fn status_left(state: &AppState) -> String {
    let Some(buffer) = state.current_buffer() else {
        return "New File".to_string();
    };
    let mut parts = vec![];
    let mut name = file_name_or_untitled(&buffer.path);
    if state.is_current_buffer_modified() {
        name.push('*');
    }
    parts.push(name);
    parts.push(format_bytes(buffer.size));
    if buffer.read_only {
        parts.push("read-only".to_string());
    }
    parts.join(" | ")
}

/// Right side of the status bar: `line:col [dir/]`, 1-based.
pub fn status_right(state: &AppState) -> String {
    let Some(buffer) = state.current_buffer() else {
        return String::new();
    };
    let cursor = state.editor.cursor();
    let position = format!("{}:{}", cursor.line + 1, cursor.column + 1);
    format!("{} [{}/]", position, macro_ui::parent_dir(&buffer.path).display())
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let style = Style::default().fg(Color::Black).bg(Color::Gray);
    let left = format!(" {}", status_left(state));
    let right = format!("{} ", status_right(state));
    let gap = (area.width as usize)
        .saturating_sub(display_width(&left) + display_width(&right))
        .max(1);
    let line = Line::from(vec![
        Span::raw(left),
        Span::raw(" ".repeat(gap)),
        Span::raw(right),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

fn render_message(frame: &mut Frame, area: Rect, state: &AppState) {
    let (message, is_error) = state.status_text();
    let style = if is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(Span::styled(message.to_string(), style)), area);
}

/// Draw the active dialog's text in a bordered box over the editor.
fn render_dialog(frame: &mut Frame, state: &AppState) {
    let Some(dialog) = &state.active_dialog else {
        return;
    };
    let area = frame.area();
    let text = dialog.view(area.width, area.height);
    if text.is_empty() {
        return;
    }

    let content_width = text.lines().map(display_width).max().unwrap_or(0) as u16;
    let content_height = text.lines().count() as u16;
    // Border plus one column of padding on each side
    let rect = centered_rect(content_width + 4, content_height + 2, area);

    let selected = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = text
        .lines()
        .map(|line| {
            if line.starts_with(row_prefix(true)) {
                Line::from(Span::styled(line.to_string(), selected))
            } else {
                Line::from(line.to_string())
            }
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
