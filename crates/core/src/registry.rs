//! Command catalog contributed by plugins at startup.
//!
//! Plugins append descriptors to a [`RegistryBuilder`] while the editor
//! starts; [`RegistryBuilder::build`] freezes the catalog into a
//! [`CommandRegistry`] that is only read from then on.

use std::fmt;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use macro_keyboard::KeyBinding;

use crate::context::EditorContext;
use crate::message::Action;

/// Execution closure bound to a command.
pub type ExecuteFn = Arc<dyn Fn(&mut dyn EditorContext) -> Option<Action> + Send + Sync>;

/// A named, keyed, described command.
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    /// Key label shown to the user, e.g. `Ctrl-S`
    pub key: String,
    pub description: String,
    /// Keys that trigger the command from the editor
    pub key_binding: KeyBinding,
    pub execute: Option<ExecuteFn>,
}

impl CommandDescriptor {
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            description: description.into(),
            key_binding: KeyBinding::default(),
            execute: None,
        }
    }

    /// Set the keys that trigger this command.
    pub fn with_binding(mut self, binding: KeyBinding) -> Self {
        self.key_binding = binding;
        self
    }

    /// Bind the execution closure.
    pub fn with_execute(
        mut self,
        execute: impl Fn(&mut dyn EditorContext) -> Option<Action> + Send + Sync + 'static,
    ) -> Self {
        self.execute = Some(Arc::new(execute));
        self
    }

    pub fn is_executable(&self) -> bool {
        self.execute.is_some()
    }

    /// Run the command against `ctx`. Does nothing without a closure.
    pub fn run(&self, ctx: &mut dyn EditorContext) -> Option<Action> {
        self.execute.as_ref().and_then(|execute| execute(ctx))
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("description", &self.description)
            .field("executable", &self.is_executable())
            .finish()
    }
}

/// A unit contributing commands to the registry.
pub trait Plugin {
    fn name(&self) -> &'static str;
    fn register(&self, registry: &mut RegistryBuilder);
}

/// Registry under construction.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: Vec<CommandDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command. Names are not checked for uniqueness.
    pub fn register(&mut self, command: CommandDescriptor) -> &mut Self {
        macro_logger::debug(format!("Registered command '{}'", command.name));
        self.commands.push(command);
        self
    }

    /// Let a plugin register its commands.
    pub fn register_plugin(&mut self, plugin: &dyn Plugin) -> &mut Self {
        let before = self.commands.len();
        plugin.register(self);
        macro_logger::info(format!(
            "Plugin '{}' registered {} command(s)",
            plugin.name(),
            self.commands.len() - before
        ));
        self
    }

    /// Register every plugin, in order.
    pub fn with_plugins<'a>(mut self, plugins: impl IntoIterator<Item = &'a dyn Plugin>) -> Self {
        for plugin in plugins {
            self.register_plugin(plugin);
        }
        self
    }

    /// Freeze the catalog.
    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            commands: self.commands.into(),
        }
    }
}

/// Frozen command catalog, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Arc<[CommandDescriptor]>,
}

impl CommandRegistry {
    /// Independent copy of the commands, in registration order.
    pub fn list(&self) -> Vec<CommandDescriptor> {
        self.commands.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    /// First command registered under `name`.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// First executable command bound to the key.
    pub fn find_by_key(&self, key: &KeyEvent) -> Option<&CommandDescriptor> {
        self.commands
            .iter()
            .find(|c| c.is_executable() && c.key_binding.matches(key))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    struct Demo;

    impl Plugin for Demo {
        fn name(&self) -> &'static str {
            "demo"
        }

        fn register(&self, registry: &mut RegistryBuilder) {
            registry
                .register(CommandDescriptor::new("save", "Ctrl-S", "Save file"))
                .register(CommandDescriptor::new("quit", "Ctrl-Q", "Quit editor"));
        }
    }

    fn names(commands: &[CommandDescriptor]) -> Vec<&str> {
        commands.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut builder = RegistryBuilder::new();
        builder.register(CommandDescriptor::new("b", "", ""));
        builder.register(CommandDescriptor::new("a", "", ""));
        builder.register(CommandDescriptor::new("c", "", ""));
        let registry = builder.build();

        assert_eq!(names(&registry.list()), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_list_is_an_independent_copy() {
        let mut builder = RegistryBuilder::new();
        builder.register(CommandDescriptor::new("save", "Ctrl-S", "Save file"));
        let registry = builder.build();

        let mut first = registry.list();
        first.clear();
        first.push(CommandDescriptor::new("intruder", "", ""));

        assert_eq!(names(&registry.list()), vec!["save"]);
    }

    #[test]
    fn test_duplicate_names_coexist() {
        let mut builder = RegistryBuilder::new();
        builder.register(CommandDescriptor::new("save", "Ctrl-S", "first"));
        builder.register(CommandDescriptor::new("save", "Ctrl-S", "second"));
        let registry = builder.build();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("save").unwrap().description, "first");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_plugins_register_in_order() {
        let registry = RegistryBuilder::new()
            .with_plugins([&Demo as &dyn Plugin, &Demo])
            .build();
        assert_eq!(names(&registry.list()), vec!["save", "quit", "save", "quit"]);
    }

    #[test]
    fn test_find_by_key_skips_commands_without_closure() {
        let mut builder = RegistryBuilder::new();
        builder.register(
            CommandDescriptor::new("label-only", "Ctrl-S", "")
                .with_binding(KeyBinding::single("ctrl+s")),
        );
        builder.register(
            CommandDescriptor::new("file-save", "Ctrl-S", "")
                .with_binding(KeyBinding::single("ctrl+s"))
                .with_execute(|_| None),
        );
        let registry = builder.build();

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(registry.find_by_key(&ctrl_s).unwrap().name, "file-save");
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert!(registry.find_by_key(&ctrl_x).is_none());
    }
}
