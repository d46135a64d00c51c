//! Terminal rendering for the block puzzle.
//!
//! The board draws in pixel space through the core [`Surface`](crate::core::Surface)
//! trait. This crate projects that space onto a character framebuffer (two
//! columns per cell to keep blocks square) and flushes it to the terminal,
//! re-emitting only the cells that changed.
//!
//! - [`GridCanvas`]: pure, testable projection onto a [`FrameBuffer`]
//! - [`TerminalRenderer`]: crossterm output with diffing
//! - [`TerminalSurface`]: both combined, used by the binary

pub mod canvas;
pub mod fb;
pub mod renderer;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{GridCanvas, GridProjection, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::TerminalSurface;
