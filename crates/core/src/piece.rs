//! Piece module - a group of cells that moves and rotates as one
//!
//! Cells are absolute pixel rectangles. The origin is the pixel position the
//! shape offsets were laid out from; rotation pivots around it.
//!
//! Moving and rotating never check bounds. The board snapshots a piece,
//! applies the change, tests collisions and restores on failure.

use crate::surface::Surface;
use crate::types::{PieceKind, Rect, Rgb, CELL_HEIGHT, CELL_WIDTH, MESH_WIDTH};

/// Quarter turn, in degrees
const ROTATION_STEP_DEG: f64 = 90.0;

/// Plain copy of a piece's mutable geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    cells: Vec<Rect>,
    x: i32,
    y: i32,
}

/// A falling or settled piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: Vec<Rect>,
    x: i32,
    y: i32,
    color: Rgb,
    rotation_enabled: bool,
}

impl Piece {
    /// Lay out `offsets` (in cells) from the pixel origin `(x, y)`
    pub fn new(
        kind: PieceKind,
        offsets: &[(i32, i32)],
        x: i32,
        y: i32,
        color: Rgb,
        rotation_enabled: bool,
    ) -> Self {
        let cells = offsets
            .iter()
            .map(|&(dx, dy)| Rect::new(x + dx * CELL_WIDTH, y + dy * CELL_HEIGHT, CELL_WIDTH, CELL_HEIGHT))
            .collect();
        Self {
            kind,
            cells,
            x,
            y,
            color,
            rotation_enabled,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> &[Rect] {
        &self.cells
    }

    /// Pixel origin the piece rotates around
    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    pub fn has_cells(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Translate every cell and the origin by `(dx, dy)` pixels
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        for cell in &mut self.cells {
            *cell = cell.translated(dx, dy);
        }
        self.x += dx;
        self.y += dy;
    }

    /// Rotate 90° around the origin (no-op if rotation is disabled)
    pub fn rotate(&mut self) {
        if !self.rotation_enabled {
            return;
        }
        self.cells = self.rotated_cells(ROTATION_STEP_DEG);
    }

    /// Return a copy rotated 90° around the origin
    pub fn rotated(&self) -> Piece {
        let mut out = self.clone();
        out.rotate();
        out
    }

    fn rotated_cells(&self, degrees: f64) -> Vec<Rect> {
        let rads = degrees.to_radians();
        let (sin, cos) = rads.sin_cos();
        self.cells
            .iter()
            .map(|cell| {
                let gx = (cell.x - self.x) as f64 / CELL_WIDTH as f64;
                let gy = (cell.y - self.y) as f64 / CELL_HEIGHT as f64;
                let rx = gx * cos - gy * sin;
                let ry = gy * cos + gx * sin;
                let nx = (rx * CELL_WIDTH as f64).round() as i32 + self.x;
                let ny = (ry * CELL_HEIGHT as f64).round() as i32 + self.y;
                Rect::new(nx, ny, cell.w, cell.h)
            })
            .collect()
    }

    /// Drop the cells on pixel row `row_y` and shift the cells above it down
    /// by one cell. Cells below the row are untouched.
    pub fn remove_row(&mut self, row_y: i32) {
        self.cells.retain(|cell| cell.y != row_y);
        for cell in &mut self.cells {
            if cell.y < row_y {
                cell.y += CELL_HEIGHT;
            }
        }
    }

    pub fn snapshot(&self) -> PieceSnapshot {
        PieceSnapshot {
            cells: self.cells.clone(),
            x: self.x,
            y: self.y,
        }
    }

    pub fn restore(&mut self, snapshot: PieceSnapshot) {
        self.cells = snapshot.cells;
        self.x = snapshot.x;
        self.y = snapshot.y;
    }

    /// Check whether any cell overlaps any of `rects`
    pub fn collides_with(&self, rects: &[Rect]) -> bool {
        rects
            .iter()
            .any(|rect| self.cells.iter().any(|cell| cell.intersects(rect)))
    }

    /// Check whether any cell overlaps any cell of `other`
    pub fn collides_with_piece(&self, other: &Piece) -> bool {
        self.collides_with(&other.cells)
    }

    /// Draw every cell filled with the piece color and outlined in black
    pub fn render<S: Surface>(&self, surface: &mut S) {
        for cell in &self.cells {
            surface.fill_rect(*cell, self.color);
            surface.outline_rect(*cell, Rgb::BLACK, MESH_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_piece() -> Piece {
        Piece::new(
            PieceKind::T,
            &[(0, 0), (1, 0), (2, 0), (1, 1)],
            100,
            49,
            Rgb::PURPLE,
            true,
        )
    }

    #[test]
    fn test_new_lays_out_offsets_in_pixels() {
        let p = t_piece();
        assert_eq!(
            p.cells(),
            &[
                Rect::new(100, 49, 20, 20),
                Rect::new(120, 49, 20, 20),
                Rect::new(140, 49, 20, 20),
                Rect::new(120, 69, 20, 20),
            ]
        );
        assert_eq!(p.origin(), (100, 49));
    }

    #[test]
    fn test_move_translates_cells_and_origin() {
        let mut p = t_piece();
        p.move_by(-20, 20);
        assert_eq!(p.origin(), (80, 69));
        assert_eq!(p.cells()[0], Rect::new(80, 69, 20, 20));
        assert_eq!(p.cells()[3], Rect::new(100, 89, 20, 20));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut p = t_piece();
        p.rotate();
        // (dx, dy) -> (-dy, dx)
        assert_eq!(
            p.cells(),
            &[
                Rect::new(100, 49, 20, 20),
                Rect::new(100, 69, 20, 20),
                Rect::new(100, 89, 20, 20),
                Rect::new(80, 69, 20, 20),
            ]
        );
        assert_eq!(p.origin(), (100, 49));
    }

    #[test]
    fn test_rotated_leaves_original_untouched() {
        let p = t_piece();
        let r = p.rotated();
        assert_ne!(p.cells(), r.cells());
        assert_eq!(p, t_piece());
    }

    #[test]
    fn test_rotate_empty_piece_is_noop() {
        let mut p = Piece::new(PieceKind::I, &[], 0, 0, Rgb::RED, true);
        p.rotate();
        assert!(!p.has_cells());
    }

    #[test]
    fn test_remove_row_drops_and_shifts() {
        let mut p = t_piece();
        p.remove_row(49);
        // Row 49 cells are gone, the lower cell at 69 stays where it is.
        assert_eq!(p.cells(), &[Rect::new(120, 69, 20, 20)]);

        let mut p = t_piece();
        p.remove_row(69);
        assert_eq!(
            p.cells(),
            &[
                Rect::new(100, 69, 20, 20),
                Rect::new(120, 69, 20, 20),
                Rect::new(140, 69, 20, 20),
            ]
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let mut p = t_piece();
        let snap = p.snapshot();
        p.move_by(20, 20);
        p.rotate();
        p.restore(snap);
        assert_eq!(p, t_piece());
    }

    #[test]
    fn test_collides_with() {
        let p = t_piece();
        assert!(p.collides_with(&[Rect::new(130, 60, 5, 5)]));
        assert!(!p.collides_with(&[Rect::new(160, 49, 20, 20)]));
        assert!(!p.collides_with(&[]));
    }
}
