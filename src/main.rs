//! Terminal block puzzle runner (default binary).
//!
//! Usage: `blockfall [WIDTH HEIGHT]` (board size in cells).
//!
//! Set `BLOCKFALL_LOG_PATH` to journal game events as JSON lines.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};

use blockfall::core::{Board, BoardGeometry, EventSource, Surface};
use blockfall::input::TerminalEvents;
use blockfall::journal::{Journal, JournalConfig};
use blockfall::term::{TerminalSurface, Viewport};
use blockfall::types::{BoardConfig, GameAction, GameStatus};

const FRAME: Duration = Duration::from_millis(16);
/// Narrowest board where an I piece fits right of the spawn point
const MIN_WIDTH: u16 = 8;
const MIN_HEIGHT: u16 = 4;
const MAX_CELLS: u16 = 200;

const PAUSE_MESSAGE: [&str; 2] = ["PAUSE", "Press \"p\" to continue"];
const GAME_OVER_MESSAGE: [&str; 2] = ["Game Over", "Press \"q\" to exit"];

fn main() -> Result<()> {
    let config = parse_board_config(std::env::args().skip(1))?;
    // Reported before raw mode so the message stays readable.
    let mut journal = Journal::open(&JournalConfig::from_env())?;
    let mut board = Board::new(config, clock_seed());

    let mut session = Session::new(&board, terminal_viewport());
    session.surface.enter()?;

    let result = run(&mut board, &mut session, &mut journal);

    // Always try to restore terminal state.
    let _ = session.surface.exit();
    result
}

fn run(board: &mut Board, session: &mut Session, journal: &mut Journal) -> Result<()> {
    while board.is_running() {
        let report = board.tick(session)?;
        if report.speedup {
            session.events.set_fall_interval_ms(board.fall_interval_ms());
        }
        journal.record(&report, board);

        if session.events.take_resized() {
            session.surface.resize(terminal_viewport());
        }

        board.render(&mut session.surface);
        if board.is_running() {
            session.surface.present()?;
            session.events.wait_for_input(FRAME)?;
        }
    }

    if board.status() == GameStatus::GameOver {
        board.render_message(&mut session.surface, &GAME_OVER_MESSAGE);
        session.surface.present()?;
        session.events.wait_for_quit()?;
    }
    Ok(())
}

/// Terminal input plus output, so the pause screen can be drawn from inside a tick.
struct Session {
    events: TerminalEvents,
    surface: TerminalSurface,
    geometry: BoardGeometry,
}

impl Session {
    fn new(board: &Board, viewport: Viewport) -> Self {
        Self {
            events: TerminalEvents::new(board.fall_interval_ms()),
            surface: TerminalSurface::new(board.geometry(), viewport),
            geometry: *board.geometry(),
        }
    }
}

impl EventSource for Session {
    type Error = anyhow::Error;

    fn poll(&mut self) -> Result<Option<GameAction>> {
        self.events.poll()
    }

    fn wait_for_resume(&mut self) -> Result<()> {
        // The canvas still holds the last frame; draw the message over it.
        self.geometry.render_message(&mut self.surface, &PAUSE_MESSAGE);
        self.surface.present()?;
        self.events.wait_for_resume()
    }
}

fn terminal_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn parse_board_config(args: impl IntoIterator<Item = String>) -> Result<BoardConfig> {
    let args: Vec<String> = args.into_iter().collect();
    match args.as_slice() {
        [] => Ok(BoardConfig::default()),
        [width, height] => Ok(BoardConfig::new(
            parse_dimension("width", width, MIN_WIDTH)?,
            parse_dimension("height", height, MIN_HEIGHT)?,
        )),
        _ => bail!("usage: blockfall [WIDTH HEIGHT]"),
    }
}

fn parse_dimension(name: &str, value: &str, min: u16) -> Result<u16> {
    let cells: u16 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid board {name}: {value:?}"))?;
    if !(min..=MAX_CELLS).contains(&cells) {
        bail!("board {name} must be between {min} and {MAX_CELLS} cells, got {cells}");
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_uses_default_board() {
        assert_eq!(parse_board_config(args(&[])).unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_width_and_height() {
        let config = parse_board_config(args(&["10", "12"])).unwrap();
        assert_eq!(config, BoardConfig::new(10, 12));
        let config = parse_board_config(args(&["8", "4"])).unwrap();
        assert_eq!(config, BoardConfig::new(8, 4));
    }

    #[test]
    fn test_rejects_bad_args() {
        assert!(parse_board_config(args(&["10"])).is_err());
        assert!(parse_board_config(args(&["ten", "12"])).is_err());
        assert!(parse_board_config(args(&["7", "12"])).is_err());
        assert!(parse_board_config(args(&["8", "3"])).is_err());
        assert!(parse_board_config(args(&["10", "201"])).is_err());
    }
}
