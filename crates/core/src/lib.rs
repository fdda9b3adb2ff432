//! Plugin contracts for macro.
//!
//! Plugins contribute commands and dialogs without knowing the editor's
//! internals: commands live in a [`CommandRegistry`], run against an
//! [`EditorContext`], open [`Dialog`]s and report back through
//! self-handling [`PluginMessage`]s.

pub mod context;
pub mod dialog;
pub mod event;
pub mod message;
pub mod registry;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use context::{BufferInfo, EditorContext};
pub use dialog::Dialog;
pub use event::EventHandler;
pub use message::{Action, Message, PluginMessage};
pub use registry::{CommandDescriptor, CommandRegistry, ExecuteFn, Plugin, RegistryBuilder};

// Re-export for plugin crates
pub use macro_keyboard::KeyBinding;
