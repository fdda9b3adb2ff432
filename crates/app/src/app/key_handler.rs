//! Keyboard routing: active dialog first, then command bindings, then the
//! editing widget.

use crossterm::event::KeyEvent;
use macro_core::{Action, Message};

use super::App;

impl App {
    pub(super) fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.state.active_dialog.is_some() {
            return self.forward_to_dialog(&Message::Key(key));
        }

        if let Some(command) = self.state.registry.find_by_key(&key).cloned() {
            macro_logger::debug(format!("Key bound to '{}'", command.name));
            return command.run(&mut self.state);
        }

        if self.state.current.is_some() {
            self.state.editor.handle_key(&key);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crossterm::event::{KeyCode, KeyModifiers};
    use macro_config::Config;
    use macro_core::{CommandDescriptor, CommandRegistry, EditorContext, KeyBinding};
    use macro_core::RegistryBuilder;

    #[test]
    fn test_keys_without_buffer_are_ignored() {
        let mut app = App::new(AppState::new(Config::default(), CommandRegistry::default()));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(app.handle_key_event(key).is_none());
        assert_eq!(app.state().current_content(), "");
    }

    #[test]
    fn test_binding_without_closure_falls_through() {
        let mut builder = RegistryBuilder::new();
        builder.register(
            CommandDescriptor::new("inert", "X", "").with_binding(KeyBinding::single("x")),
        );
        builder.register(
            CommandDescriptor::new("loud", "X", "")
                .with_binding(KeyBinding::single("x"))
                .with_execute(|ctx| {
                    ctx.set_info("loud".to_string());
                    None
                }),
        );
        let mut app = App::new(AppState::new(Config::default(), builder.build()));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.state().status_text(), ("loud", false));
    }
}
