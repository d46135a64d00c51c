//! Scripted event source for headless runs.
//!
//! Actions queued with [`ScriptedEvents::push`] are drained by the next
//! [`Board::tick`](crate::board::Board::tick). Pauses resume immediately and
//! are counted so callers can assert on them.

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::surface::EventSource;
use crate::types::GameAction;

#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<GameAction>,
    pauses: usize,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: GameAction) -> &mut Self {
        self.queue.push_back(action);
        self
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = GameAction>) -> &mut Self {
        self.queue.extend(actions);
        self
    }

    /// Actions not yet consumed
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of times the board waited for a resume
    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

impl EventSource for ScriptedEvents {
    type Error = Infallible;

    fn poll(&mut self) -> Result<Option<GameAction>, Self::Error> {
        Ok(self.queue.pop_front())
    }

    fn wait_for_resume(&mut self) -> Result<(), Self::Error> {
        self.pauses += 1;
        Ok(())
    }
}
