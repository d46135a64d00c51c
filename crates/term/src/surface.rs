//! TerminalSurface: a [`GridCanvas`] flushed through a [`TerminalRenderer`].

use anyhow::Result;

use crate::canvas::{GridCanvas, Viewport};
use crate::core::{BoardGeometry, Surface};
use crate::fb::{FrameBuffer, Rgb};
use crate::renderer::TerminalRenderer;
use crate::types::Rect;

pub struct TerminalSurface {
    canvas: GridCanvas,
    renderer: TerminalRenderer,
}

impl TerminalSurface {
    pub fn new(geometry: &BoardGeometry, viewport: Viewport) -> Self {
        Self {
            canvas: GridCanvas::with_viewport(geometry, viewport),
            renderer: TerminalRenderer::new(),
        }
    }

    /// Switch the terminal to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    /// Restore the terminal
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Re-center on a new terminal size; the next present is a full redraw
    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas.resize(viewport);
        self.renderer.invalidate();
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        self.canvas.framebuffer()
    }
}

impl Surface for TerminalSurface {
    type Error = anyhow::Error;

    fn fill_background(&mut self, color: Rgb) {
        self.canvas.fill_background(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.canvas.fill_rect(rect, color);
    }

    fn outline_rect(&mut self, rect: Rect, color: Rgb, width: i32) {
        self.canvas.outline_rect(rect, color, width);
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        self.canvas.text_size(text)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        self.canvas.draw_text(x, y, text, color);
    }

    fn present(&mut self) -> Result<()> {
        self.renderer.draw(self.canvas.framebuffer())
    }
}
