//! Main application module.
//!
//! Contains the App struct, the dispatch loop and the terminal run loop.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{backend::Backend, Terminal};

use macro_config::constants::EVENT_POLL_INTERVAL_MS;
use macro_core::{Action, EventHandler, Message};

use crate::render;
use crate::state::AppState;

mod key_handler;

/// Main application
pub struct App {
    state: AppState,
    event_handler: EventHandler,
    /// Messages emitted for the next iteration
    queue: VecDeque<Message>,
    /// Delayed messages and when they are due
    timers: Vec<(Instant, Message)>,
    /// Results of background jobs
    job_tx: mpsc::Sender<Message>,
    job_rx: mpsc::Receiver<Message>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let (job_tx, job_rx) = mpsc::channel();
        Self {
            state,
            event_handler: EventHandler::new(Duration::from_millis(EVENT_POLL_INTERVAL_MS)),
            queue: VecDeque::new(),
            timers: Vec::new(),
            job_tx,
            job_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Deliver one message and perform the action it produces.
    pub fn dispatch(&mut self, msg: Message) {
        let action = match msg {
            Message::Plugin(plugin_msg) => plugin_msg.handle(&mut self.state),
            Message::Key(key) => self.handle_key_event(key),
            Message::Resize { width, height } => {
                self.state.update_terminal_size(width, height);
                self.forward_to_dialog(&Message::Resize { width, height })
            }
            blink @ Message::Blink(_) => self.forward_to_dialog(&blink),
        };
        self.perform(action);
        self.state.needs_redraw = true;
    }

    /// Give a message to the active dialog, dropping the dialog once it
    /// hides itself.
    pub(crate) fn forward_to_dialog(&mut self, msg: &Message) -> Option<Action> {
        let dialog = self.state.active_dialog.take()?;
        let (dialog, action) = dialog.update(msg);
        if dialog.is_visible() {
            self.state.active_dialog = Some(dialog);
        } else {
            macro_logger::debug("Dialog closed");
        }
        action
    }

    /// Schedule an action.
    pub fn perform(&mut self, action: Option<Action>) {
        let Some(action) = action else {
            return;
        };
        match action {
            Action::Emit(msg) => self.queue.push_back(msg),
            Action::Spawn(job) => {
                let tx = self.job_tx.clone();
                thread::spawn(move || {
                    // Receiver is gone only when the editor is shutting down
                    let _ = tx.send(job());
                });
            }
            Action::After(delay, msg) => self.timers.push((Instant::now() + delay, msg)),
            Action::Batch(actions) => {
                for action in actions {
                    self.perform(Some(action));
                }
            }
            Action::Quit => self.state.should_quit = true,
        }
    }

    /// Deliver due timers, finished jobs and queued messages. Returns true
    /// if anything was delivered.
    pub fn process_pending(&mut self) -> bool {
        let now = Instant::now();
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(at, _)| *at <= now);
        self.timers = waiting;
        self.queue.extend(due.into_iter().map(|(_, msg)| msg));
        while let Ok(msg) = self.job_rx.try_recv() {
            self.queue.push_back(msg);
        }

        let mut delivered = false;
        while let Some(msg) = self.queue.pop_front() {
            if self.state.should_quit {
                break;
            }
            self.dispatch(msg);
            delivered = true;
        }
        delivered
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size()?;
        self.state.update_terminal_size(size.width, size.height);
        macro_logger::info("Editor started");

        while !self.state.should_quit {
            if let Some(msg) = self.event_handler.next()? {
                self.dispatch(msg);
            }
            self.process_pending();

            // Render only when something changed
            if self.state.needs_redraw && !self.state.should_quit {
                terminal.draw(|frame| render::render(frame, &mut self.state))?;
                self.state.needs_redraw = false;
            }
        }

        macro_logger::info("Editor stopped");
        Ok(())
    }
}
