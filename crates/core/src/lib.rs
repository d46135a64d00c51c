//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals, files, or clocks:
//!
//! - **Deterministic**: Same seed and the same input script produce identical games
//! - **Testable**: Rendering and input are traits ([`Surface`], [`EventSource`])
//! - **Portable**: Any backend that can fill rectangles and deliver key events works
//!
//! # Module Structure
//!
//! - [`piece`]: Cells in pixel space, move/rotate, row removal, snapshot/restore
//! - [`shapes`]: The seven shape definitions
//! - [`board`]: Board controller running the per-tick update
//! - [`scoring`]: Score and speed progression
//! - [`rng`]: Uniform random piece selection
//! - [`surface`]: Rendering and input collaborator traits
//! - [`script`]: Queue-backed event source for headless runs
//!
//! # Game Rules
//!
//! - Pieces spawn at the top center and fall one cell per timer tick
//! - A batch of inputs that ends overlapping a border or another piece is rolled back whole
//! - A piece locks when it hits the floor or cannot fall onto the pieces below
//! - A row is cleared when it holds exactly `cells_per_line` cells
//! - Each cleared row scores `cells_per_line * POINT_VALUE`; crossing the score
//!   threshold multiplies speed by 1.5 and the threshold by 2
//! - The game is lost when a new piece cannot leave the spawn point
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, ScriptedEvents};
//! use blockfall_types::{BoardConfig, Direction, GameAction, PieceKind};
//!
//! let mut board = Board::new(BoardConfig::new(16, 30), 12345);
//! board.spawn_piece(PieceKind::T);
//!
//! let mut events = ScriptedEvents::new();
//! events.push(GameAction::Move(Direction::Right)).push(GameAction::Tick);
//! board.tick(&mut events).unwrap();
//!
//! assert_eq!(board.active().unwrap().origin(), (188, 69));
//! ```

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod script;
pub mod shapes;
pub mod surface;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardGeometry, TickReport, MAX_PIECE_ROWS};
pub use piece::{Piece, PieceSnapshot};
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::SpeedProgression;
pub use script::ScriptedEvents;
pub use shapes::{shape, ShapeDef};
pub use surface::{EventSource, Surface};
