//! Messages flowing through the dispatch loop and the deferred actions that
//! produce them.

use std::fmt;
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::context::EditorContext;

/// A message delivered to the dispatch loop.
#[derive(Debug)]
pub enum Message {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Caret blink tick for the text input with this id
    Blink(u64),
    /// Self-handling message produced by a plugin or dialog
    Plugin(Box<dyn PluginMessage>),
}

impl Message {
    /// Wrap a plugin message.
    pub fn plugin(msg: impl PluginMessage + 'static) -> Self {
        Message::Plugin(Box::new(msg))
    }
}

/// A message that knows how to apply itself to the editor.
///
/// The host never inspects plugin message types: it calls [`handle`] with
/// its own context and performs whatever action comes back.
///
/// [`handle`]: PluginMessage::handle
pub trait PluginMessage: fmt::Debug + Send {
    fn handle(self: Box<Self>, ctx: &mut dyn EditorContext) -> Option<Action>;
}

/// Work scheduled through the dispatch loop instead of running inline.
pub enum Action {
    /// Deliver a message on the next loop iteration
    Emit(Message),
    /// Run a blocking job off the loop thread, its result re-enters as a message
    Spawn(Box<dyn FnOnce() -> Message + Send>),
    /// Deliver a message once the delay elapsed
    After(Duration, Message),
    /// Several actions, performed in order
    Batch(Vec<Action>),
    /// Leave the editor
    Quit,
}

impl Action {
    /// Emit a plugin message.
    pub fn plugin(msg: impl PluginMessage + 'static) -> Self {
        Action::Emit(Message::plugin(msg))
    }

    /// Run `job` in the background.
    pub fn spawn(job: impl FnOnce() -> Message + Send + 'static) -> Self {
        Action::Spawn(Box::new(job))
    }

    /// Combine optional actions, dropping the empty ones.
    pub fn batch(actions: impl IntoIterator<Item = Option<Action>>) -> Option<Action> {
        let mut actions: Vec<Action> = actions.into_iter().flatten().collect();
        match actions.len() {
            0 => None,
            1 => actions.pop(),
            _ => Some(Action::Batch(actions)),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Emit(msg) => f.debug_tuple("Emit").field(msg).finish(),
            Action::Spawn(_) => f.write_str("Spawn(..)"),
            Action::After(delay, msg) => f.debug_tuple("After").field(delay).field(msg).finish(),
            Action::Batch(actions) => f.debug_tuple("Batch").field(actions).finish(),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drops_empty_actions() {
        assert!(Action::batch([None, None]).is_none());
        assert!(matches!(
            Action::batch([None, Some(Action::Quit)]),
            Some(Action::Quit)
        ));
        match Action::batch([Some(Action::Quit), Some(Action::Emit(Message::Blink(1)))]) {
            Some(Action::Batch(actions)) => assert_eq!(actions.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_spawn_runs_job() {
        let action = Action::spawn(|| Message::Blink(7));
        let Action::Spawn(job) = action else {
            panic!("expected spawn");
        };
        assert!(matches!(job(), Message::Blink(7)));
    }
}
