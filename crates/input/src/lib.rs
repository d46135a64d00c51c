//! Terminal input module (engine-facing).
//!
//! This module maps `crossterm` key events into [`crate::types::GameAction`],
//! drives the periodic fall timer and exposes both through the core
//! [`EventSource`](crate::core::EventSource) trait.

pub mod events;
pub mod map;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use events::TerminalEvents;
pub use map::{handle_key_event, is_resume_key, should_quit};
pub use timer::FallTimer;
