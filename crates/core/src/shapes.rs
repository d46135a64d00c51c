//! Shape table - the seven piece definitions
//!
//! Offsets are in cells relative to the spawn origin. The O piece has rotation
//! disabled since all four of its orientations are identical.

use crate::piece::Piece;
use crate::types::{PieceKind, Rgb};

/// Static definition of one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: PieceKind,
    pub offsets: [(i32, i32); 4],
    pub color: Rgb,
    pub rotation_enabled: bool,
}

impl ShapeDef {
    /// Build a fresh piece of this shape at pixel origin `(x, y)`
    pub fn spawn(&self, x: i32, y: i32) -> Piece {
        Piece::new(self.kind, &self.offsets, x, y, self.color, self.rotation_enabled)
    }
}

const I_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::I,
    offsets: [(0, 0), (1, 0), (2, 0), (3, 0)],
    color: Rgb::RED,
    rotation_enabled: true,
};

const S_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::S,
    offsets: [(0, 0), (1, 0), (0, 1), (-1, 1)],
    color: Rgb::GREEN,
    rotation_enabled: true,
};

const J_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::J,
    offsets: [(0, 0), (1, 0), (2, 0), (2, 1)],
    color: Rgb::BLUE,
    rotation_enabled: true,
};

const O_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::O,
    offsets: [(0, 0), (0, 1), (1, 0), (1, 1)],
    color: Rgb::ORANGE,
    rotation_enabled: false,
};

const Z_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::Z,
    offsets: [(-1, 0), (0, 0), (0, 1), (1, 1)],
    color: Rgb::GOLD,
    rotation_enabled: true,
};

const T_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::T,
    offsets: [(0, 0), (1, 0), (2, 0), (1, 1)],
    color: Rgb::PURPLE,
    rotation_enabled: true,
};

const L_SHAPE: ShapeDef = ShapeDef {
    kind: PieceKind::L,
    offsets: [(0, 0), (1, 0), (2, 0), (0, 1)],
    color: Rgb::CYAN,
    rotation_enabled: true,
};

/// Get the shape definition for a piece kind
pub fn shape(kind: PieceKind) -> &'static ShapeDef {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::L => &L_SHAPE,
    }
}
