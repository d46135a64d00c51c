//! Board module - the game controller
//!
//! Owns the border rectangles, every placed piece (the falling one included),
//! the index of the active piece and the score/speed progression.
//!
//! One call to [`Board::tick`] runs a full update:
//!
//! 1. spawn a random piece if the previous one locked
//! 2. drain the event source and apply every action to the active piece
//! 3. reject the whole batch if the piece now overlaps a border or another piece
//! 4. probe one cell down against other pieces to decide whether it can still fall
//! 5. flag game over if it cannot fall and never left the spawn point
//! 6. lock it and clear the completed rows it touches
//!
//! Pixel coordinates: x grows to the right, y grows downward.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::rng::PieceRandomizer;
use crate::scoring::SpeedProgression;
use crate::shapes::shape;
use crate::surface::{EventSource, Surface};
use crate::types::{
    BoardConfig, GameAction, GameStatus, PieceKind, Rect, Rgb, BOARD_MARGIN, BOARD_UP_MARGIN,
    BORDER_THICKNESS, CELL_HEIGHT, CELL_WIDTH, POINT_MARGIN,
};

/// Most distinct rows a spawned piece can span
pub const MAX_PIECE_ROWS: usize = 4;

/// Pixel layout derived from the board size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub res_x: i32,
    pub res_y: i32,
    pub up: Rect,
    pub down: Rect,
    pub left: Rect,
    pub right: Rect,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub cells_per_line: u32,
}

impl BoardGeometry {
    pub fn new(config: BoardConfig) -> Self {
        let res_x = config.width_cells as i32 * CELL_WIDTH + 2 * BORDER_THICKNESS + BOARD_MARGIN;
        let res_y = config.height_cells as i32 * CELL_HEIGHT + 2 * BORDER_THICKNESS + BOARD_MARGIN;

        Self {
            res_x,
            res_y,
            up: Rect::new(0, BOARD_UP_MARGIN, res_x, BORDER_THICKNESS),
            down: Rect::new(0, res_y - BORDER_THICKNESS, res_x, BORDER_THICKNESS),
            left: Rect::new(0, BOARD_UP_MARGIN, BORDER_THICKNESS, res_y),
            right: Rect::new(res_x - BORDER_THICKNESS, BOARD_UP_MARGIN, BORDER_THICKNESS, res_y),
            // ceil(res_x / 2)
            spawn_x: (res_x + 1) / 2,
            spawn_y: BOARD_UP_MARGIN + BORDER_THICKNESS + BOARD_MARGIN,
            cells_per_line: config.cells_per_line(),
        }
    }

    /// Spawn coordinate of every new piece
    pub fn spawn(&self) -> (i32, i32) {
        (self.spawn_x, self.spawn_y)
    }

    /// All four borders: up, down, left, right
    pub fn borders(&self) -> [Rect; 4] {
        [self.up, self.down, self.left, self.right]
    }

    /// Borders a piece may never overlap while moving sideways or rotating
    pub fn side_borders(&self) -> [Rect; 3] {
        [self.left, self.up, self.right]
    }

    /// Draw `lines` horizontally centered, starting at mid-height
    pub fn render_message<S: Surface>(&self, surface: &mut S, lines: &[&str]) {
        let max_w = lines
            .iter()
            .map(|line| surface.text_size(line).0)
            .max()
            .unwrap_or(0);
        let x = self.res_x / 2 - max_w / 2;
        let mut y = self.res_y / 2;
        for line in lines {
            surface.draw_text(x, y, line, Rgb::WHITE);
            y += surface.text_size(line).1;
        }
    }
}

/// What happened during one [`Board::tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Kind of the piece spawned at the start of the tick
    pub spawned: Option<PieceKind>,
    /// Kind of the piece that locked at the end of the tick
    pub locked: Option<PieceKind>,
    /// Pixel rows cleared, in the order they were cleared
    pub rows_cleared: ArrayVec<i32, MAX_PIECE_ROWS>,
    /// The speed increased; the fall timer needs reprogramming
    pub speedup: bool,
    /// The input batch was rolled back
    pub rejected: bool,
    pub quit: bool,
    pub game_over: bool,
}

/// Game controller: pieces, collisions, locking, scoring
#[derive(Debug, Clone)]
pub struct Board {
    geometry: BoardGeometry,
    /// Every placed piece, the active one included
    pieces: Vec<Piece>,
    /// Index of the falling piece inside `pieces`
    active: Option<usize>,
    progression: SpeedProgression,
    randomizer: PieceRandomizer,
    new_piece_pending: bool,
    status: GameStatus,
}

impl Board {
    /// Create an empty board; the first tick spawns a piece
    pub fn new(config: BoardConfig, seed: u32) -> Self {
        Self::with_randomizer(config, PieceRandomizer::new(seed))
    }

    pub fn with_randomizer(config: BoardConfig, randomizer: PieceRandomizer) -> Self {
        Self {
            geometry: BoardGeometry::new(config),
            pieces: Vec::new(),
            active: None,
            progression: SpeedProgression::new(),
            randomizer,
            new_piece_pending: true,
            status: GameStatus::Running,
        }
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn borders(&self) -> [Rect; 4] {
        self.geometry.borders()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The falling piece, if one is in play
    pub fn active(&self) -> Option<&Piece> {
        self.active.and_then(|idx| self.pieces.get(idx))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn speed(&self) -> f64 {
        self.progression.speed()
    }

    pub fn progression(&self) -> &SpeedProgression {
        &self.progression
    }

    /// Fall timer period for the current speed
    pub fn fall_interval_ms(&self) -> u32 {
        self.progression.fall_interval_ms()
    }

    pub fn status_line(&self) -> String {
        self.progression.status_line()
    }

    /// Whether the next tick starts by spawning a piece
    pub fn new_piece_pending(&self) -> bool {
        self.new_piece_pending
    }

    /// Count cells across all pieces whose top edge is at `row_y`
    pub fn cells_in_row(&self, row_y: i32) -> u32 {
        self.pieces
            .iter()
            .flat_map(|p| p.cells().iter())
            .filter(|cell| cell.y == row_y)
            .count() as u32
    }

    /// Spawn a piece of `kind` at the spawn coordinate and make it active
    pub fn spawn_piece(&mut self, kind: PieceKind) {
        let (x, y) = self.geometry.spawn();
        self.insert_active(shape(kind).spawn(x, y));
    }

    /// Add `piece` to the board as the active piece
    ///
    /// The piece must span at most [`MAX_PIECE_ROWS`] distinct rows.
    pub fn insert_active(&mut self, piece: Piece) {
        self.pieces.push(piece);
        self.active = Some(self.pieces.len() - 1);
        self.new_piece_pending = false;
    }

    /// Add `piece` as settled geometry
    pub fn insert_locked(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    /// Run one update against the pending input of `source`
    pub fn tick<E: EventSource>(&mut self, source: &mut E) -> Result<TickReport, E::Error> {
        let mut report = TickReport::default();
        if self.status != GameStatus::Running {
            return Ok(report);
        }

        if self.new_piece_pending {
            let kind = self.randomizer.draw();
            self.spawn_piece(kind);
            report.spawned = Some(kind);
        }

        let Some(idx) = self.active else {
            return Ok(report);
        };

        let before = self.pieces[idx].snapshot();
        if let Err(err) = self.drain_input(idx, source) {
            // Leave the piece where it was checked last.
            self.pieces[idx].restore(before);
            return Err(err);
        }
        report.quit = self.status == GameStatus::Quit;

        let piece = &self.pieces[idx];
        let down_hit = piece.collides_with(&[self.geometry.down]);
        let side_hit = piece.collides_with(&self.geometry.side_borders());
        let piece_hit = self.collides_with_others(idx);

        if down_hit || side_hit || piece_hit {
            self.pieces[idx].restore(before);
            report.rejected = true;
        }

        let can_move_down = self.probe_down(idx);

        if !can_move_down && self.pieces[idx].origin() == self.geometry.spawn() {
            self.status = GameStatus::GameOver;
            report.game_over = true;
        }

        if down_hit || !can_move_down {
            report.locked = Some(self.pieces[idx].kind());
            self.new_piece_pending = true;
            self.active = None;
            self.clear_completed_rows(idx, &mut report);
        }

        Ok(report)
    }

    fn drain_input<E: EventSource>(&mut self, idx: usize, source: &mut E) -> Result<(), E::Error> {
        while let Some(action) = source.poll()? {
            self.apply_action(idx, action, source)?;
        }
        Ok(())
    }

    fn apply_action<E: EventSource>(
        &mut self,
        idx: usize,
        action: GameAction,
        source: &mut E,
    ) -> Result<(), E::Error> {
        match action {
            GameAction::Quit => self.status = GameStatus::Quit,
            GameAction::Move(direction) => {
                let (dx, dy) = direction.delta();
                self.pieces[idx].move_by(dx, dy);
            }
            GameAction::Rotate => self.pieces[idx].rotate(),
            GameAction::Pause => source.wait_for_resume()?,
            GameAction::Tick => self.pieces[idx].move_by(0, CELL_HEIGHT),
        }
        Ok(())
    }

    fn collides_with_others(&self, idx: usize) -> bool {
        let active = &self.pieces[idx];
        self.pieces
            .iter()
            .enumerate()
            .any(|(i, other)| i != idx && other.collides_with_piece(active))
    }

    /// Borders are ignored: only settled pieces stop the fall here.
    fn probe_down(&mut self, idx: usize) -> bool {
        let snapshot = self.pieces[idx].snapshot();
        self.pieces[idx].move_by(0, CELL_HEIGHT);
        let can_move_down = !self.collides_with_others(idx);
        self.pieces[idx].restore(snapshot);
        can_move_down
    }

    /// Clear every complete row the locked piece occupies.
    ///
    /// Rows are visited top first: clearing a row only shifts the rows above
    /// it, so the rows still to be visited keep their contents.
    fn clear_completed_rows(&mut self, idx: usize, report: &mut TickReport) {
        let mut rows: ArrayVec<i32, MAX_PIECE_ROWS> = ArrayVec::new();
        for cell in self.pieces[idx].cells() {
            if !rows.contains(&cell.y) {
                rows.push(cell.y);
            }
        }
        rows.sort_unstable();

        for row_y in rows {
            if self.cells_in_row(row_y) != self.geometry.cells_per_line {
                continue;
            }

            self.remove_row(row_y);
            report.rows_cleared.push(row_y);
            if self.progression.award_line(self.geometry.cells_per_line) {
                report.speedup = true;
            }
        }
    }

    fn remove_row(&mut self, row_y: i32) {
        for piece in &mut self.pieces {
            piece.remove_row(row_y);
        }
        self.pieces.retain(Piece::has_cells);
    }

    /// Draw background, borders, pieces and the status line
    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.fill_background(Rgb::BLACK);
        for border in self.geometry.borders() {
            surface.fill_rect(border, Rgb::WHITE);
        }
        for piece in &self.pieces {
            piece.render(surface);
        }
        surface.draw_text(POINT_MARGIN, POINT_MARGIN, &self.status_line(), Rgb::WHITE);
    }

    /// Draw `lines` centered on the board, one below the other
    pub fn render_message<S: Surface>(&self, surface: &mut S, lines: &[&str]) {
        self.geometry.render_message(surface, lines);
    }
}
