//! Display-width aware string helpers.
//!
//! Dialogs lay out plain text for a fixed-width viewport, so every row has
//! to be measured in terminal columns rather than bytes or chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut a string so it fits in `width` columns.
pub fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Keep the last columns of a string so it fits in `width` columns.
pub fn truncate_start_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            return &text[idx + ch.len_utf8()..];
        }
        used += w;
    }
    text
}

/// Truncate or right-pad a string to exactly `width` columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let mut out = String::with_capacity(width.max(cut.len()));
    out.push_str(cut);
    let pad = width.saturating_sub(display_width(cut));
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Left-align `text` in a column of `width`, never truncating.
///
/// Equivalent of a `%-Ns` format directive, measured in display columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hi", 10), "hi");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // CJK characters take two columns each
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_start_to_width("日本語", 5), "本語");
    }

    #[test]
    fn test_fit_to_width_pads_and_cuts() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 4), "abcd");
        assert_eq!(display_width(&fit_to_width("日本語", 5)), 5);
    }

    #[test]
    fn test_pad_right_never_truncates() {
        assert_eq!(pad_right("save", 6), "save  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
