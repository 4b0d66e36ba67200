//! Event handling for the interactive UI

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// New terminal size in columns and rows
    Resize(u16, u16),
    /// Nothing happened within the poll timeout
    Tick,
}

/// Event handler for keyboard input and terminal resizes
pub struct EventHandler {
    /// Timeout for polling events, also the animation frame interval
    timeout: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(100),
        }
    }

    /// Wait up to the poll timeout for the next event
    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(AppEvent::Key(key)),
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
        Ok(AppEvent::Tick)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
