//! Modal dialog contract.

use std::fmt;

use crate::message::{Action, Message};

/// A modal UI state machine overlaying the editor.
///
/// The host owns at most one active dialog. It forwards key, resize and
/// blink messages to it, renders [`view`] as an overlay while
/// [`is_visible`] holds, and drops the dialog once it turns invisible.
///
/// [`view`]: Dialog::view
/// [`is_visible`]: Dialog::is_visible
pub trait Dialog: fmt::Debug {
    /// Startup action, performed by the loop right after activation.
    fn init(&mut self) -> Option<Action>;

    /// Apply one message and return the dialog that replaces this one.
    fn update(self: Box<Self>, msg: &Message) -> (Box<dyn Dialog>, Option<Action>);

    /// Render for a terminal of the given size.
    ///
    /// Returns an empty string once dismissed. Must not change state.
    fn view(&self, width: u16, height: u16) -> String;

    fn is_visible(&self) -> bool;
}
