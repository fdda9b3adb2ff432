//! Key bindings and key event matching.
//!
//! Commands and dialogs describe the keys they react to with textual
//! chords such as `"ctrl+s"`, `"esc"` or `"ctrl+shift+p"`. This crate parses
//! those chords once and matches them against crossterm key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    /// Create a chord from a key code and modifiers.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Parse a chord like `"ctrl+s"` or `"shift+tab"`.
    ///
    /// Returns `None` for unknown key names.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = spec.split('+').collect();

        // "ctrl++" leaves an empty last segment
        let key = match parts.pop()? {
            "" if spec.ends_with("++") => "+",
            other => other,
        };
        if parts.last() == Some(&"") {
            parts.pop();
        }

        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        // Terminals report ctrl+space as NUL, which is also spelled ctrl+@
        let code = if key == "@" && modifiers.contains(KeyModifiers::CONTROL) {
            KeyCode::Char(' ')
        } else {
            parse_key_code(key)?
        };
        Some(Self { code, modifiers })
    }

    /// Check whether a key event triggers this chord.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        normalize(self.code, self.modifiers) == normalize(key.code, key.modifiers)
    }
}

fn parse_key_code(key: &str) -> Option<KeyCode> {
    let code = match key.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdown" => KeyCode::PageDown,
        "space" | " " => KeyCode::Char(' '),
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return Some(KeyCode::F(n));
            }
            let mut chars = key.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };
    Some(code)
}

/// Bring a code/modifier pair into a comparable form.
///
/// With ctrl or alt held, an uppercase letter is read as shift plus the
/// lowercase letter, since terminals disagree on which form they report.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    let mut modifiers =
        modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    match code {
        KeyCode::Char(ch) if ch.is_ascii_alphabetic() => {
            let chorded = modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if ch.is_ascii_uppercase() && chorded {
                modifiers |= KeyModifiers::SHIFT;
            }
            if !chorded {
                // Plain letters carry their case in the char itself
                modifiers.remove(KeyModifiers::SHIFT);
                return (KeyCode::Char(ch), modifiers);
            }
            (KeyCode::Char(ch.to_ascii_lowercase()), modifiers)
        }
        KeyCode::Char(ch) => {
            // Shifted symbols already encode shift in the char
            modifiers.remove(KeyModifiers::SHIFT);
            (KeyCode::Char(ch), modifiers)
        }
        KeyCode::BackTab => (KeyCode::BackTab, modifiers.difference(KeyModifiers::SHIFT)),
        other => (other, modifiers),
    }
}

/// A set of chords that trigger the same action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBinding {
    chords: Vec<KeyChord>,
}

impl KeyBinding {
    /// Build a binding from chord specs, skipping unparsable ones.
    pub fn new<'a>(specs: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            chords: specs.into_iter().filter_map(KeyChord::parse).collect(),
        }
    }

    /// Build a binding from a single chord spec.
    pub fn single(spec: &str) -> Self {
        Self::new([spec])
    }

    /// Check whether any chord of the binding matches the event.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.chords.iter().any(|chord| chord.matches(key))
    }

    /// Parsed chords.
    pub fn chords(&self) -> &[KeyChord] {
        &self.chords
    }

    /// Check whether no chord could be parsed.
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

/// Check whether a key event is plain text input (no ctrl/alt).
pub fn is_text_input(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(ch)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_ctrl_letter() {
        let chord = KeyChord::parse("ctrl+s").unwrap();
        assert_eq!(chord.code, KeyCode::Char('s'));
        assert_eq!(chord.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(KeyChord::parse("esc").unwrap().code, KeyCode::Esc);
        assert_eq!(KeyChord::parse("enter").unwrap().code, KeyCode::Enter);
        assert_eq!(KeyChord::parse("up").unwrap().code, KeyCode::Up);
        assert_eq!(KeyChord::parse("f5").unwrap().code, KeyCode::F(5));
    }

    #[test]
    fn test_parse_unknown_modifier() {
        assert!(KeyChord::parse("hyper+s").is_none());
        assert!(KeyChord::parse("ctrl+nonsense").is_none());
    }

    #[test]
    fn test_ctrl_space_variants() {
        let event = key(KeyCode::Char(' '), KeyModifiers::CONTROL);
        assert!(KeyChord::parse("ctrl+space").unwrap().matches(&event));
        assert!(KeyChord::parse("ctrl+ ").unwrap().matches(&event));
        assert!(KeyChord::parse("ctrl+@").unwrap().matches(&event));
    }

    #[test]
    fn test_ctrl_uppercase_implies_shift() {
        let chord = KeyChord::parse("ctrl+s").unwrap();
        assert!(chord.matches(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!chord.matches(&key(KeyCode::Char('S'), KeyModifiers::CONTROL)));
        assert!(!chord.matches(&key(KeyCode::Char('s'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_ctrl_shift_letter() {
        let chord = KeyChord::parse("ctrl+shift+p").unwrap();
        assert!(chord.matches(&key(
            KeyCode::Char('P'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
        assert!(chord.matches(&key(KeyCode::Char('P'), KeyModifiers::CONTROL)));
        assert!(!chord.matches(&key(KeyCode::Char('p'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_plain_letters_are_case_sensitive() {
        let lower = KeyChord::parse("y").unwrap();
        let upper = KeyChord::parse("Y").unwrap();
        assert!(lower.matches(&key(KeyCode::Char('y'), KeyModifiers::NONE)));
        assert!(upper.matches(&key(KeyCode::Char('Y'), KeyModifiers::SHIFT)));
        assert!(!lower.matches(&key(KeyCode::Char('Y'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_binding_matches_any_chord() {
        let binding = KeyBinding::new(["esc", "ctrl+c"]);
        assert_eq!(binding.chords().len(), 2);
        assert!(binding.matches(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(binding.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_text_input_detection() {
        assert_eq!(
            is_text_input(&key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some('a')
        );
        assert_eq!(
            is_text_input(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some('A')
        );
        assert_eq!(
            is_text_input(&key(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(is_text_input(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }
}
