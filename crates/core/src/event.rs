//! Terminal event polling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use crate::message::Message;

/// Event handler for polling terminal events
pub struct EventHandler {
    poll_interval: Duration,
}

impl EventHandler {
    /// Create new event handler with specified poll interval
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Wait up to the poll interval for the next terminal message.
    ///
    /// Returns `None` when nothing relevant arrived in time.
    pub fn next(&self) -> Result<Option<Message>> {
        if !event::poll(self.poll_interval)? {
            return Ok(None);
        }
        let msg = match event::read()? {
            // With kitty keyboard protocol, we receive Press, Release, and Repeat events.
            // Only handle Press events to avoid duplicate actions.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Key(key)),
            CrosstermEvent::Resize(width, height) => Some(Message::Resize { width, height }),
            _ => None,
        };
        Ok(msg)
    }
}
