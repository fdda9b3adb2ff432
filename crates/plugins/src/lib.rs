//! Built-in plugins for macro.
//!
//! Each module is one plugin: it registers its commands with a
//! [`RegistryBuilder`](macro_core::RegistryBuilder) and talks to the editor
//! only through [`EditorContext`](macro_core::EditorContext).

pub mod buffer_close;
pub mod buffer_switcher;
pub mod file_switcher;
pub mod goto;
pub mod help;
pub mod quit;
pub mod save;

use macro_core::Plugin;

pub use buffer_close::{BufferClosePlugin, BufferCloseConfirmed};
pub use buffer_switcher::{BufferSelected, BufferSwitcherDialog, BufferSwitcherPlugin};
pub use file_switcher::FileSwitcherPlugin;
pub use goto::{GotoDialog, GotoLine, GotoPlugin};
pub use help::HelpPlugin;
pub use quit::{QuitConfirmed, QuitPlugin};
pub use save::SavePlugin;

/// Every built-in plugin, in registration order.
pub fn all() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(SavePlugin),
        Box::new(QuitPlugin),
        Box::new(BufferClosePlugin),
        Box::new(BufferSwitcherPlugin),
        Box::new(FileSwitcherPlugin),
        Box::new(GotoPlugin),
        Box::new(HelpPlugin),
    ]
}
