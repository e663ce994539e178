//! Read-only snapshot of the engine for rendering
//!
//! Pull-based query surface: the driver fills a `GameSnapshot` once per
//! frame and the view layer renders from it without touching the engine.

use crate::core::engine::Engine;
use crate::types::{GamePhase, PieceKind, Player, Pose, Tile, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Everything the renderer needs about one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub grid: [[Tile; PLAYFIELD_WIDTH]; PLAYFIELD_HEIGHT],
    pub active: Option<Pose>,
    pub next: PieceKind,
    pub score: u32,
    pub top: u32,
    pub level: u32,
    pub lines: u32,
    pub lost: bool,
    /// Lowest row the active pose could reach by straight drop; `None` when
    /// the guide is disabled or no piece is active.
    pub guide_row: Option<i32>,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Tile::Empty; PLAYFIELD_WIDTH]; PLAYFIELD_HEIGHT],
            active: None,
            next: PieceKind::I,
            score: 0,
            top: 0,
            level: 0,
            lines: 0,
            lost: false,
            guide_row: None,
        }
    }
}

/// A full renderable view of the game.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub two_players: bool,
    pub players: [PlayerSnapshot; 2],
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::Title,
            two_players: false,
            players: [PlayerSnapshot::default(); 2],
        }
    }
}

impl Engine {
    /// Fill an existing snapshot without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase();
        out.two_players = self.two_players();
        for player in Player::BOTH {
            let session = self.session(player);
            let view = &mut out.players[player.index()];
            self.playfield(player).write_grid(&mut view.grid);
            view.active = session.pose();
            view.next = session.next_piece();
            view.score = session.score();
            view.top = session.top();
            view.level = session.level();
            view.lines = session.lines();
            view.lost = session.lost();
            view.guide_row = if session.guide_enabled() {
                self.landing_row(player)
            } else {
                None
            };
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
