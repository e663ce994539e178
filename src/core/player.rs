//! Player session - one player's mutable game state
//!
//! Score, level and line accounting follow the NES rules: a clear is worth
//! `LINE_SCORES[rows] * (level + 1)` plus the accumulated soft-drop bonus,
//! and a level-up needs both ten lines since the last level-up and a
//! lifetime total that has caught up with `(level + 1) * 10` - so starting
//! above level 0 still costs the full distance.

use crate::types::{PieceKind, Pose, INITIAL_TOP_SCORE, LINES_PER_LEVEL, LINE_SCORES};

/// Per-player state. Playfields live next to sessions in the engine.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    /// Active falling piece; `None` only before the first game starts.
    pub(crate) pose: Option<Pose>,
    /// The shape that will spawn after the active piece locks.
    pub(crate) next: PieceKind,
    /// Soft-drop bonus accumulator, paid out at the next lock.
    pub(crate) drop_counter: u32,
    /// When set, the next gravity tick only collapses cleared rows and the
    /// piece holds still for one beat.
    pub(crate) delay_gravity: bool,
    /// Level a restarted game begins at.
    pub(crate) level_on_restart: u32,
    pub(crate) score: u32,
    /// Best score this process has seen; survives restarts.
    pub(crate) top: u32,
    pub(crate) level: u32,
    pub(crate) lines: u32,
    pub(crate) lines_this_level: u32,
    /// Set on the player whose spawn collided (decides the two-player winner).
    pub(crate) lost: bool,
    /// Landing-guide display toggle.
    pub(crate) show_guide: bool,
}

impl PlayerSession {
    pub(crate) fn new() -> Self {
        Self {
            pose: None,
            next: PieceKind::I,
            drop_counter: 0,
            delay_gravity: false,
            level_on_restart: 0,
            score: 0,
            top: INITIAL_TOP_SCORE,
            level: 0,
            lines: 0,
            lines_this_level: 0,
            lost: false,
            show_guide: true,
        }
    }

    /// Reset the per-game state. `top` and `level_on_restart` survive.
    pub(crate) fn reset_for_start(&mut self) {
        self.level = self.level_on_restart;
        self.score = 0;
        self.drop_counter = 0;
        self.lines = 0;
        self.lines_this_level = 0;
        self.delay_gravity = false;
        self.lost = false;
    }

    /// Score a lock that cleared `rows` rows (0-4) and advance the level
    /// when earned. Also pays out and resets the soft-drop bonus.
    pub(crate) fn apply_clear(&mut self, rows: usize) {
        self.score += LINE_SCORES[rows] * (self.level + 1);
        self.score += self.drop_counter;
        self.drop_counter = 0;

        if self.score > self.top {
            self.top = self.score;
        }

        self.lines += rows as u32;
        self.lines_this_level += rows as u32;
        if self.lines_this_level >= LINES_PER_LEVEL
            && self.lines >= (self.level + 1) * LINES_PER_LEVEL
        {
            // Carry the excess over instead of resetting to zero.
            self.lines_this_level -= LINES_PER_LEVEL;
            self.level += 1;
        }
    }

    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn drop_counter(&self) -> u32 {
        self.drop_counter
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lost(&self) -> bool {
        self.lost
    }

    pub fn guide_enabled(&self) -> bool {
        self.show_guide
    }
}
