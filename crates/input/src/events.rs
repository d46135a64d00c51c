//! Terminal event source.
//!
//! Merges the fall timer and crossterm key events into one queue of
//! [`GameAction`]s. Polling never blocks; pausing blocks on the terminal until
//! the resume key arrives.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::core::EventSource;
use crate::map::{handle_key_event, is_resume_key, should_quit};
use crate::timer::FallTimer;
use crate::types::GameAction;

pub struct TerminalEvents {
    timer: FallTimer,
    resized: bool,
}

impl TerminalEvents {
    pub fn new(fall_interval_ms: u32) -> Self {
        Self {
            timer: FallTimer::new(fall_interval_ms, Instant::now()),
            resized: false,
        }
    }

    /// Reprogram the fall timer, e.g. after a speedup
    pub fn set_fall_interval_ms(&mut self, interval_ms: u32) {
        self.timer.set_interval_ms(interval_ms, Instant::now());
    }

    /// Returns true once after the terminal was resized
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }

    /// Sleep until input arrives, the fall timer is due, or `max_wait` passes
    pub fn wait_for_input(&mut self, max_wait: Duration) -> Result<()> {
        let timeout = self.timer.until_due(Instant::now()).min(max_wait);
        event::poll(timeout)?;
        Ok(())
    }

    /// Block until a quit key is pressed
    pub fn wait_for_quit(&mut self) -> Result<()> {
        loop {
            if let Some(key) = self.read_key_press()? {
                if should_quit(key) {
                    return Ok(());
                }
            }
        }
    }

    fn read_key_press(&mut self) -> Result<Option<KeyEvent>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            Event::Resize(_, _) => {
                self.resized = true;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl EventSource for TerminalEvents {
    type Error = anyhow::Error;

    fn poll(&mut self) -> Result<Option<GameAction>> {
        if self.timer.poll_due(Instant::now()) {
            return Ok(Some(GameAction::Tick));
        }

        while event::poll(Duration::ZERO)? {
            if let Some(key) = self.read_key_press()? {
                if let Some(action) = handle_key_event(key) {
                    return Ok(Some(action));
                }
            }
        }
        Ok(None)
    }

    fn wait_for_resume(&mut self) -> Result<()> {
        loop {
            if let Some(key) = self.read_key_press()? {
                if is_resume_key(key) {
                    break;
                }
            }
        }
        // Ticks that came due while paused are dropped.
        self.timer.restart(Instant::now());
        Ok(())
    }
}
