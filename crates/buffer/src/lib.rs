//! Buffers and text editing for macro.
//!
//! Provides the open-buffer model, a rope-backed editing widget built on
//! ropey, file loading/saving and per-file cursor persistence.

mod buffer;
mod cursor_state;
pub mod file_io;
mod text_area;

pub use buffer::Buffer;
pub use cursor_state::CursorState;
pub use file_io::LoadedFile;
pub use text_area::{CursorPos, TextArea};
