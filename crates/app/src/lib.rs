//! Editor host for macro.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  macro-editor (bin): CLI, terminal setup, plugin list    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  macro-app (this crate)                                  │
//! │  App: dispatch loop   AppState: EditorContext   render   │
//! └──────────────────────────────────────────────────────────┘
//!        │               │                │
//!        ▼               ▼                ▼
//!   macro-core      macro-buffer     macro-dialog
//! ```
//!
//! Plugins never see [`AppState`]; they get `&mut dyn EditorContext`.

pub mod app;
pub mod render;
pub mod state;

pub use app::App;
pub use state::{AppState, SaveFinished};
