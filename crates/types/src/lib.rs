//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, event journal).
//!
//! # Coordinate Space
//!
//! The playfield lives in **pixel space**: every cell is a `CELL_WIDTH` x `CELL_HEIGHT`
//! square at integer pixel coordinates, and the board is framed by four border
//! rectangles. Rendering backends project this space onto whatever they draw on.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CELL_WIDTH` / `CELL_HEIGHT` | 20 | Cell size in pixels |
//! | `MESH_WIDTH` | 1 | Cell outline width |
//! | `BORDER_THICKNESS` | 7 | Thickness of the four board borders |
//! | `BOARD_UP_MARGIN` | 40 | Space above the top border (status line) |
//! | `BOARD_MARGIN` | 2 | Gap between the top border and the spawn row |
//!
//! # Timing and Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_TICK_MS` | 1000 | Fall interval at speed 1x |
//! | `GAME_SPEEDUP_RATIO` | 1.5 | Speed multiplier per threshold crossing |
//! | `SCORE_LEVEL` | 2000 | First speedup threshold |
//! | `SCORE_LEVEL_RATIO` | 2 | Threshold multiplier per crossing |
//! | `POINT_VALUE` | 100 | Points per cell of a cleared row |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BoardConfig, Rect};
//!
//! assert_eq!(BoardConfig::new(15, 30).cells_per_line(), 14);
//!
//! let a = Rect::new(0, 0, 20, 20);
//! assert!(a.intersects(&Rect::new(10, 10, 20, 20)));
//! assert!(!a.intersects(&Rect::new(20, 0, 20, 20)));
//! ```

/// Cell width in pixels
pub const CELL_WIDTH: i32 = 20;

/// Cell height in pixels
pub const CELL_HEIGHT: i32 = 20;

/// Width of the outline drawn around each cell
pub const MESH_WIDTH: i32 = 1;

/// Thickness of each board border rectangle
pub const BORDER_THICKNESS: i32 = 7;

/// Space above the top border, used by the status line
pub const BOARD_UP_MARGIN: i32 = 40;

/// Gap between the top border and the spawn row
pub const BOARD_MARGIN: i32 = 2;

/// Fall interval at speed 1x (milliseconds)
pub const MOVE_TICK_MS: u32 = 1000;

/// Speed multiplier applied on each score threshold crossing
pub const GAME_SPEEDUP_RATIO: f64 = 1.5;

/// Score that must be exceeded for the first speedup
pub const SCORE_LEVEL: u32 = 2000;

/// Threshold multiplier applied on each crossing
pub const SCORE_LEVEL_RATIO: u32 = 2;

/// Points awarded per cell of a cleared row
pub const POINT_VALUE: u32 = 100;

/// Pixel offset of the status line from the top-left corner
pub const POINT_MARGIN: i32 = 10;

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u16 = 16;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u16 = 20;


/// Axis-aligned rectangle in pixel space.
///
/// Intersection is strict: rectangles that only share an edge do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check whether two rectangles overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Return a copy moved by `(dx, dy)`
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 69, 0);
    pub const GOLD: Rgb = Rgb::new(255, 125, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Red, horizontal bar
/// - **S**: Green, S-shaped
/// - **J**: Blue, J-shaped
/// - **O**: Orange, 2x2 square (never rotates)
/// - **Z**: Gold, Z-shaped (mirror of S)
/// - **T**: Purple, T-shaped
/// - **L**: Cyan, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    S,
    J,
    O,
    Z,
    T,
    L,
}

impl PieceKind {
    /// All kinds, in shape-table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::S,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::L,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::J => "j",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::L => "l",
        }
    }
}

/// Direction of a one-cell player move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Pixel delta of a one-cell move in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-CELL_WIDTH, 0),
            Direction::Right => (CELL_WIDTH, 0),
            Direction::Down => (0, CELL_HEIGHT),
        }
    }
}

/// Discrete inputs consumed by the board controller
///
/// Player keys and the periodic fall timer are both delivered as actions;
/// the controller treats them identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Stop the game
    Quit,
    /// Move the active piece one cell
    Move(Direction),
    /// Rotate the active piece 90°
    Rotate,
    /// Block until the resume input arrives
    Pause,
    /// Fall timer fired: move the active piece one cell down
    Tick,
}

/// Lifecycle of a game run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Pieces are falling
    Running,
    /// Player asked to quit
    Quit,
    /// A freshly spawned piece could not fall
    GameOver,
}

/// Playfield size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width_cells: u16,
    pub height_cells: u16,
}

impl BoardConfig {
    pub const fn new(width_cells: u16, height_cells: u16) -> Self {
        Self {
            width_cells,
            height_cells,
        }
    }

    /// Number of cells that make a complete row
    ///
    /// Odd widths lose one column: the spawn point is centered, so only an
    /// even number of columns fit between the borders.
    pub fn cells_per_line(&self) -> u32 {
        let w = self.width_cells as u32;
        if w % 2 == 0 {
            w
        } else {
            w - 1
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
