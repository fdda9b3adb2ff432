mod cli;

use std::io;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use macro_app::{App, AppState};
use macro_config::constants::MAX_LOG_ENTRIES;
use macro_config::Config;
use macro_core::{EditorContext, RegistryBuilder};
use macro_logger::LogLevel;

use crate::cli::Args;

/// Warnings and errors echoed to stderr when the editor fails.
const FAILURE_LOG_ENTRIES: usize = 10;

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(mode) = args.read_only_mode() {
        config.editor.read_only = mode;
    }

    let min_level = args
        .log_level
        .or_else(|| LogLevel::from_str(&config.logging.min_level).ok())
        .unwrap_or(LogLevel::Info);
    macro_logger::init(config.log_file_path(), MAX_LOG_ENTRIES, min_level);
    if let Some(e) = config_error {
        macro_logger::warn(format!("Using default config: {:#}", e));
    }

    let plugins = macro_plugins::all();
    let registry = RegistryBuilder::new()
        .with_plugins(plugins.iter().map(|p| p.as_ref()))
        .build();
    macro_logger::info(format!("{} commands registered", registry.len()));

    let mut state = AppState::new(config, registry);
    match Config::cursor_state_path() {
        Ok(path) => state = state.with_cursor_state(path),
        Err(e) => macro_logger::warn(format!("Cursor positions will not persist: {:#}", e)),
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    execute!(stdout, EnterAlternateScreen)?;
    if keyboard_enhanced {
        // Needed to tell ctrl+space and friends apart from plain keys
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    state.update_terminal_size(size.width, size.height);

    let mut app = App::new(state);
    open_initial(&mut app, &args);

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        macro_logger::error(format!("Editor failed: {:#}", err));
        eprintln!("Error: {:?}", err);
        report_recent_problems();
    }

    Ok(())
}

/// Print the last warnings and errors from the log, oldest first.
fn report_recent_problems() {
    let problems: Vec<_> = macro_logger::entries()
        .into_iter()
        .filter(|entry| entry.level >= LogLevel::Warn)
        .collect();
    let skip = problems.len().saturating_sub(FAILURE_LOG_ENTRIES);
    // The failure itself is always the last entry
    if problems.len() > 1 {
        eprintln!("Recent log entries:");
        for entry in &problems[skip..] {
            eprintln!("  {}", entry);
        }
    }
}

/// Open the file named on the command line, or the file picker when it is a
/// directory or missing.
fn open_initial(app: &mut App, args: &Args) {
    let target = args.file.clone();
    let state = app.state_mut();
    let action = match target {
        Some(dir) if dir.is_dir() => state.show_file_picker(&dir),
        Some(path) => match state.open_or_create(&path) {
            Ok(()) => None,
            Err(e) => {
                macro_logger::error(format!("Failed to open {}: {:#}", path.display(), e));
                state.set_error(format!("Error loading file: {:#}", e));
                None
            }
        },
        None => state.show_file_picker(&std::path::PathBuf::from(".")),
    };
    app.perform(action);
}
