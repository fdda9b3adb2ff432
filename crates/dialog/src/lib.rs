//! Modal dialogs for macro.
//!
//! Every dialog renders to plain text for a given terminal size; the editor
//! draws the box around it. List dialogs share [`FuzzyList`] for filtering
//! and [`DialogFrame`] for layout.

pub mod confirm;
pub mod file_picker;
pub mod frame;
pub mod fuzzy_list;
pub mod palette;

pub use confirm::ConfirmDialog;
pub use file_picker::{FilePickerDialog, FileSelected};
pub use frame::{row_prefix, schedule_blink, DialogFrame, ListKeys, FILTER_LABEL};
pub use fuzzy_list::FuzzyList;
pub use palette::{CommandSelected, PaletteDialog};
