//! Scoring module - score and speed progression
//!
//! Each cleared row is worth `cells_per_line * POINT_VALUE`. When the score
//! exceeds the current threshold, the threshold is multiplied by
//! `SCORE_LEVEL_RATIO` and the speed by `GAME_SPEEDUP_RATIO`, at most once
//! per cleared row.

use crate::types::{GAME_SPEEDUP_RATIO, MOVE_TICK_MS, POINT_VALUE, SCORE_LEVEL, SCORE_LEVEL_RATIO};

/// Score, fall speed and the next speedup threshold
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedProgression {
    score: u32,
    speed: f64,
    score_level: u32,
}

impl SpeedProgression {
    pub fn new() -> Self {
        Self {
            score: 0,
            speed: 1.0,
            score_level: SCORE_LEVEL,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Score that must be exceeded for the next speedup
    pub fn score_level(&self) -> u32 {
        self.score_level
    }

    /// Credit one cleared row. Returns true if this crossed the threshold.
    pub fn award_line(&mut self, cells_per_line: u32) -> bool {
        self.score = self
            .score
            .saturating_add(cells_per_line.saturating_mul(POINT_VALUE));

        if self.score > self.score_level {
            self.score_level = self.score_level.saturating_mul(SCORE_LEVEL_RATIO);
            self.speed *= GAME_SPEEDUP_RATIO;
            return true;
        }
        false
    }

    /// Fall timer period for the current speed, never below 1ms
    pub fn fall_interval_ms(&self) -> u32 {
        let ms = (MOVE_TICK_MS as f64 / self.speed).floor();
        (ms as u32).max(1)
    }

    /// Human-readable status, e.g. `SCORE: 1600   SPEED: 1.5x`
    pub fn status_line(&self) -> String {
        format!("SCORE: {}   SPEED: {}x", self.score, self.speed)
    }
}

impl Default for SpeedProgression {
    fn default() -> Self {
        Self::new()
    }
}
