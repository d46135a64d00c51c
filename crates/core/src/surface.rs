//! Collaborator traits the board talks to.
//!
//! Both are I/O-free from the core's point of view: the terminal backend
//! implements them in `blockfall-term` and `blockfall-input`, and tests
//! implement them with plain recorders.

use crate::types::{GameAction, Rect, Rgb};

/// Pixel-space drawing target.
pub trait Surface {
    type Error;

    fn fill_background(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Outline `rect` with a border `width` pixels wide.
    fn outline_rect(&mut self, rect: Rect, color: Rgb, width: i32);

    /// Pixel extents `(w, h)` of `text` when drawn.
    fn text_size(&self, text: &str) -> (i32, i32);

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb);

    /// Show everything drawn since the last present.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Source of discrete game inputs, including the fall timer.
pub trait EventSource {
    type Error;

    /// Next pending action, without blocking.
    fn poll(&mut self) -> Result<Option<GameAction>, Self::Error>;

    /// Block until the player resumes a paused game.
    fn wait_for_resume(&mut self) -> Result<(), Self::Error>;
}
