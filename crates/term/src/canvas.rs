//! GridCanvas: projects the board's pixel space onto a terminal framebuffer.
//!
//! Every pixel rectangle is snapped to the playfield's cell grid (anchored on
//! the spawn coordinate), so a cell covers exactly one grid slot and a thin
//! border covers the slot it falls in. Each grid slot is 2 columns by 1 row.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::convert::Infallible;

use crate::core::{BoardGeometry, Surface};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Rect, CELL_HEIGHT, CELL_WIDTH, POINT_MARGIN};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal columns per grid slot.
const COLS_PER_CELL: i32 = 2;

/// Pixel-to-terminal mapping for one board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProjection {
    origin_x: i32,
    origin_y: i32,
    /// Grid slots added so the leftmost/topmost drawn slot lands on 0
    shift_col: i32,
    shift_row: i32,
    /// Terminal offset used to center the board in the viewport
    offset_x: i32,
    offset_y: i32,
    cols: u16,
    rows: u16,
}

impl GridProjection {
    pub fn new(geometry: &BoardGeometry) -> Self {
        let origin_x = geometry.spawn_x.rem_euclid(CELL_WIDTH);
        let origin_y = geometry.spawn_y.rem_euclid(CELL_HEIGHT);
        let shift_col = -(geometry.left.x - origin_x).div_euclid(CELL_WIDTH);
        let shift_row = -(POINT_MARGIN.min(geometry.up.y) - origin_y).div_euclid(CELL_HEIGHT);

        let last_col = (geometry.right.right() - 1 - origin_x).div_euclid(CELL_WIDTH) + shift_col;
        let last_row = (geometry.down.bottom() - 1 - origin_y).div_euclid(CELL_HEIGHT) + shift_row;

        Self {
            origin_x,
            origin_y,
            shift_col,
            shift_row,
            offset_x: 0,
            offset_y: 0,
            cols: ((last_col + 1) * COLS_PER_CELL).clamp(0, u16::MAX as i32) as u16,
            rows: (last_row + 1).clamp(0, u16::MAX as i32) as u16,
        }
    }

    /// Terminal size the whole board needs
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Center the board inside `viewport` (top-left if it does not fit)
    pub fn centered_in(mut self, viewport: Viewport) -> Self {
        self.offset_x = (viewport.width.saturating_sub(self.cols) / 2) as i32;
        self.offset_y = (viewport.height.saturating_sub(self.rows) / 2) as i32;
        self
    }

    fn slot_col(&self, px: i32) -> i32 {
        (px - self.origin_x).div_euclid(CELL_WIDTH) + self.shift_col
    }

    fn slot_row(&self, py: i32) -> i32 {
        (py - self.origin_y).div_euclid(CELL_HEIGHT) + self.shift_row
    }

    /// Terminal (x, y, w, h) covered by `rect`, before clipping
    pub fn project_rect(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let c0 = self.slot_col(rect.x);
        let c1 = self.slot_col(rect.right() - 1);
        let r0 = self.slot_row(rect.y);
        let r1 = self.slot_row(rect.bottom() - 1);
        (
            self.offset_x + c0 * COLS_PER_CELL,
            self.offset_y + r0,
            (c1 - c0 + 1) * COLS_PER_CELL,
            r1 - r0 + 1,
        )
    }

    /// Terminal bounds `(left, top, right, bottom)` of the board window,
    /// right and bottom exclusive
    pub fn window(&self) -> (i32, i32, i32, i32) {
        (
            self.offset_x,
            self.offset_y,
            self.offset_x + self.cols as i32,
            self.offset_y + self.rows as i32,
        )
    }

    /// Terminal position of a pixel point, at half-slot horizontal resolution
    pub fn project_point(&self, px: i32, py: i32) -> (i32, i32) {
        let half = CELL_WIDTH / COLS_PER_CELL;
        let col = (px - self.origin_x).div_euclid(half) + self.shift_col * COLS_PER_CELL;
        (self.offset_x + col, self.offset_y + self.slot_row(py))
    }
}

/// In-memory [`Surface`] backed by a [`FrameBuffer`].
pub struct GridCanvas {
    fb: FrameBuffer,
    projection: GridProjection,
    geometry: BoardGeometry,
}

impl GridCanvas {
    /// Canvas exactly the size of the board
    pub fn new(geometry: &BoardGeometry) -> Self {
        let projection = GridProjection::new(geometry);
        let (w, h) = projection.size();
        Self {
            fb: FrameBuffer::new(w, h),
            projection,
            geometry: *geometry,
        }
    }

    /// Canvas filling `viewport` with the board centered in it
    pub fn with_viewport(geometry: &BoardGeometry, viewport: Viewport) -> Self {
        let mut canvas = Self::new(geometry);
        canvas.resize(viewport);
        canvas
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.projection = GridProjection::new(&self.geometry).centered_in(viewport);
        self.fb.resize(viewport.width, viewport.height);
    }

    pub fn projection(&self) -> &GridProjection {
        &self.projection
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Fill the slots covered by `rect`, clipped to the board window.
    fn fill_projected(&mut self, rect: Rect, ch: char, style: CellStyle) {
        let (x, y, w, h) = self.projection.project_rect(rect);
        let (left, top, right, bottom) = self.projection.window();
        let (x0, y0) = (x.max(left), y.max(top));
        let (x1, y1) = ((x + w).min(right), (y + h).min(bottom));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        self.fb.fill_rect(
            x0 as u16,
            y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
            ch,
            style,
        );
    }
}

impl Surface for GridCanvas {
    type Error = Infallible;

    fn fill_background(&mut self, color: Rgb) {
        let style = CellStyle {
            bg: color,
            ..CellStyle::default()
        };
        self.fb.clear(Cell { ch: ' ', style });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let style = CellStyle {
            fg: color,
            bg: Rgb::BLACK,
            bold: false,
            dim: false,
        };
        self.fill_projected(rect, '█', style);
    }

    fn outline_rect(&mut self, _rect: Rect, _color: Rgb, _width: i32) {
        // A one-pixel mesh is thinner than a terminal cell: nothing to draw.
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        let glyphs = text.chars().count() as i32;
        (glyphs * (CELL_WIDTH / COLS_PER_CELL), CELL_HEIGHT)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        let (tx, ty) = self.projection.project_point(x, y);
        if ty < 0 || ty > u16::MAX as i32 || tx > u16::MAX as i32 {
            return;
        }
        let style = CellStyle {
            fg: color,
            bg: Rgb::BLACK,
            bold: true,
            dim: false,
        };
        // Glyphs left of column 0 are dropped; put_str clips the right side.
        let skip = (-tx).max(0) as usize;
        let Some((start, _)) = text.char_indices().nth(skip) else {
            return;
        };
        self.fb.put_str(tx.max(0) as u16, ty as u16, &text[start..], style);
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
