//! Shared UI helpers for macro: text input, layout and formatting.

pub mod input;
pub mod path_utils;
pub mod text;

pub use input::TextInput;
pub use path_utils::{file_name_or_untitled, parent_dir};
pub use text::{display_width, fit_to_width, pad_right, truncate_to_width};

use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};

/// Create a centered rectangle with fixed width and height.
///
/// Width and height are clamped to the area they are centered in.
#[inline]
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let horizontal_margin = r.width.saturating_sub(width) / 2;
    let vertical_margin = r.height.saturating_sub(height) / 2;

    let vertical_layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(vertical_margin),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Length(horizontal_margin),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical_layout[1])[1]
}

/// Format a byte count for the status bar (`512 B`, `1.5 KB`, ...).
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
