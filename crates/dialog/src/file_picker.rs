//! File picker listing the files of one directory.

use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::KeyEvent;
use macro_config::PaletteSettings;
use macro_core::{Action, Dialog, EditorContext, Message, PluginMessage};
use macro_ui::TextInput;

use crate::frame::{row_prefix, schedule_blink, DialogFrame, ListKeys, FILTER_LABEL};
use crate::fuzzy_list::FuzzyList;

const INSTRUCTIONS: &str = "↑/↓: Navigate | Enter: Open | Esc: Close";

/// Sent when a file is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelected {
    pub path: PathBuf,
}

impl PluginMessage for FileSelected {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action> {
        match ctx.open_file(&self.path) {
            Ok(()) => {
                ctx.set_info(format!("Opened {}", macro_ui::file_name_or_untitled(&self.path)));
            }
            Err(e) => {
                macro_logger::error(format!("Failed to open {}: {:#}", self.path.display(), e));
                ctx.set_error(format!("Error loading file: {:#}", e));
            }
        }
        None
    }
}

#[derive(Debug, Clone)]
struct FileItem {
    name: String,
    path: PathBuf,
}

/// Regular files of `dir`, sorted by name. Unreadable directories list
/// nothing.
fn list_files(dir: &Path) -> Vec<FileItem> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            macro_logger::warn(format!("Cannot list {}: {}", dir.display(), e));
            return Vec::new();
        }
    };
    let mut files: Vec<FileItem> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .map(|path| FileItem {
            name: macro_ui::file_name_or_untitled(&path),
            path,
        })
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

/// Fuzzy-filtered list of the files in a directory.
#[derive(Debug)]
pub struct FilePickerDialog {
    input: TextInput,
    files: FuzzyList<FileItem>,
    keys: ListKeys,
    settings: PaletteSettings,
    visible: bool,
}

impl FilePickerDialog {
    pub fn new(dir: impl AsRef<Path>, settings: PaletteSettings) -> Self {
        let input = TextInput::new()
            .with_placeholder("Type to filter files...")
            .with_char_limit(100)
            .with_width(50);
        Self {
            input,
            files: FuzzyList::new(list_files(dir.as_ref()), |f| f.name.clone()),
            keys: ListKeys::closing_on(["ctrl+p"]),
            settings,
            visible: true,
        }
    }

    /// Names of the files currently listed.
    pub fn filtered_names(&self) -> Vec<&str> {
        self.files.filtered().map(|f| f.name.as_str()).collect()
    }

    fn on_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if self.keys.close.matches(key) {
            self.visible = false;
            return None;
        }
        if self.keys.enter.matches(key) {
            let path = self.files.selected()?.path.clone();
            self.visible = false;
            return Some(Action::plugin(FileSelected { path }));
        }
        if self.keys.up.matches(key) {
            self.files.move_up();
            return None;
        }
        if self.keys.down.matches(key) {
            self.files.move_down();
            return None;
        }
        if self.input.handle_key(key) {
            self.files.set_query(self.input.text());
        }
        None
    }
}

impl Dialog for FilePickerDialog {
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
        let selected = self.files.selected_index();
        let rows = self
            .files
            .visible(frame.list_height)
            .map(|(pos, file)| format!("{}{}", row_prefix(pos == selected), file.name));
        let title = format!(
            "File Switcher ({}/{} files)",
            self.files.filtered_len(),
            self.files.total_len()
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
    use macro_core::testing::RecordingContext;

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("lib.rs"), "pub mod a;").unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        dir
    }

    #[test]
    fn test_lists_files_only_sorted() {
        let dir = fixture();
        let picker = FilePickerDialog::new(dir.path(), PaletteSettings::default());
        assert_eq!(picker.filtered_names(), vec!["README.md", "lib.rs", "main.rs"]);
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let picker = FilePickerDialog::new(dir.path().join("nope"), PaletteSettings::default());
        assert!(picker.filtered_names().is_empty());
        assert!(picker.view(80, 24).starts_with("File Switcher (0/0 files)"));
    }

    #[test]
    fn test_filter_and_open() {
        let dir = fixture();
        let mut ctx = RecordingContext::new();
        let init = ctx.set_active_dialog(Box::new(FilePickerDialog::new(
            dir.path(),
            PaletteSettings::default(),
        )));
        assert!(init.is_some());

        for c in "main".chars() {
            let action = ctx.send_to_dialog(&key(KeyCode::Char(c)));
            assert!(action.is_none());
        }
        let action = ctx.send_to_dialog(&key(KeyCode::Enter));
        ctx.perform(action);

        assert!(ctx.active_dialog.is_none());
        assert_eq!(ctx.current_content(), "fn main() {}");
        assert_eq!(ctx.info.as_deref(), Some("Opened main.rs"));
    }

    #[test]
    fn test_open_failure_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = RecordingContext::new();
        ctx.perform(Some(Action::plugin(FileSelected {
            path: dir.path().join("gone.txt"),
        })));
        assert!(ctx
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Error loading file:")));
    }

    #[test]
    fn test_toggle_key_closes() {
        let dir = fixture();
        let picker: Box<dyn Dialog> =
            Box::new(FilePickerDialog::new(dir.path(), PaletteSettings::default()));
        let ctrl_p = Message::Key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        let (picker, action) = picker.update(&ctrl_p);
        assert!(!picker.is_visible());
        assert!(action.is_none());
    }
}
