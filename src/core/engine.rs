//! Game engine - phase machine, command dispatch and gravity
//!
//! Owns both player sessions and playfields plus the shared piece
//! generator. The driver delivers `Command`s and per-player `gravity_tick`
//! calls; everything here is synchronous and single-threaded, so a tick
//! never interleaves with a command. The engine keeps no wall-clock time:
//! gravity pacing is pulled by the driver through `fall_delay`, and the
//! single-player settle pause is surfaced as a consumable request.

use std::time::Duration;

use crate::core::playfield::Playfield;
use crate::core::player::PlayerSession;
use crate::core::rng::PieceGenerator;
use crate::core::speed;
use crate::types::{Command, GamePhase, Player, Pose, HIGH_LOCK_ROW, MAX_START_LEVEL};

/// The whole game: one instance per process, constructed once and driven by
/// the command handler and the two gravity timers.
#[derive(Debug, Clone)]
pub struct Engine {
    phase: GamePhase,
    two_players: bool,
    generator: PieceGenerator,
    sessions: [PlayerSession; 2],
    fields: [Playfield; 2],
    /// Pending single-player post-lock pause, consumed by the driver.
    settle_pending: bool,
    /// Set by `start_game`, consumed by the driver to re-arm its timers.
    started_pending: bool,
}

impl Engine {
    pub fn new(seed: u32) -> Self {
        Self {
            phase: GamePhase::Title,
            two_players: false,
            generator: PieceGenerator::new(seed),
            sessions: [PlayerSession::new(), PlayerSession::new()],
            fields: [Playfield::new(), Playfield::new()],
            settle_pending: false,
            started_pending: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn two_players(&self) -> bool {
        self.two_players
    }

    pub fn session(&self, player: Player) -> &PlayerSession {
        &self.sessions[player.index()]
    }

    pub fn playfield(&self, player: Player) -> &Playfield {
        &self.fields[player.index()]
    }

    pub fn set_show_guide(&mut self, player: Player, on: bool) {
        self.sessions[player.index()].show_guide = on;
    }

    /// (Re)initialize both players and playfields and enter `Running`.
    ///
    /// Scores, levels and counters reset; top scores and the configured
    /// restart level survive. Both players draw from the shared generator.
    pub fn start_game(&mut self) {
        self.phase = GamePhase::Running;
        self.settle_pending = false;
        self.started_pending = true;
        for player in Player::BOTH {
            let i = player.index();
            self.sessions[i].reset_for_start();
            self.fields[i] = Playfield::new();
            self.sessions[i].next = self.generator.first();
            self.spawn(player);
        }
    }

    /// Promote the queued shape to the active pose and draw its successor.
    fn spawn(&mut self, player: Player) {
        let session = &mut self.sessions[player.index()];
        let kind = session.next;
        session.pose = Some(Pose::spawn(kind));
        session.next = self.generator.next(kind);
    }

    /// One gravity step for a player, delivered by that player's timer.
    ///
    /// Outside `Running` this is a no-op; the timers keep firing but their
    /// effects are gated here. When the delay flag is armed the piece holds
    /// for this beat and only marked rows collapse.
    pub fn gravity_tick(&mut self, player: Player) {
        if self.phase != GamePhase::Running {
            return;
        }
        if player == Player::Two && !self.two_players {
            return;
        }
        let i = player.index();
        if self.sessions[i].delay_gravity {
            self.sessions[i].delay_gravity = false;
            self.fields[i].collapse_cleared_rows();
        } else {
            self.descend(player);
        }
    }

    /// Move the active piece down one row, or lock it and advance.
    ///
    /// Rows marked on the previous lock collapse first, then the fit test
    /// runs against the settled field. On a lock: mark full rows in the
    /// 4-row band the piece occupied, score them, request the settle pause
    /// (single-player only), arm the delay flag for high locks, and spawn
    /// the next piece - a blocked spawn ends the game and marks the loser.
    fn descend(&mut self, player: Player) {
        let i = player.index();
        self.fields[i].collapse_cleared_rows();

        let Some(pose) = self.sessions[i].pose else {
            return;
        };

        if self.fields[i].fits(pose.shifted(0, 1)) {
            self.sessions[i].pose = Some(pose.shifted(0, 1));
            return;
        }

        self.fields[i].lock(pose);
        let marked = self.fields[i].mark_full_rows(pose.y, pose.y + 4);
        self.sessions[i].apply_clear(marked.len());

        if !self.two_players {
            self.settle_pending = true;
        }

        self.sessions[i].delay_gravity = pose.y < HIGH_LOCK_ROW;

        self.spawn(player);
        if let Some(next_pose) = self.sessions[i].pose {
            if !self.fields[i].fits(next_pose) {
                self.phase = GamePhase::GameOver;
                self.sessions[i].lost = true;
            }
        }
    }

    /// Apply a driver command. Commands that do not apply to the current
    /// phase (or to player two in single-player mode) are ignored.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::MoveLeft(p) => self.try_shift(p, -1),
            Command::MoveRight(p) => self.try_shift(p, 1),
            Command::RotateCcw(p) => self.try_rotate(p, -1),
            Command::RotateCw(p) => self.try_rotate(p, 1),
            Command::SoftDrop(p) => self.soft_drop(p),
            Command::HardDrop(p) => self.hard_drop(p),
            Command::DropReleased(p) => self.drop_released(p),
            Command::Confirm => self.confirm(),
            Command::Restart => self.restart(),
            Command::GoToTitle => self.go_to_title(),
            Command::TogglePlayerCount => self.toggle_player_count(),
            Command::StartAtLevel(level) => self.start_at_level(level),
        }
    }

    fn accepts_play_command(&self, player: Player) -> bool {
        self.phase == GamePhase::Running && (player == Player::One || self.two_players)
    }

    fn try_shift(&mut self, player: Player, dx: i32) {
        if !self.accepts_play_command(player) {
            return;
        }
        let i = player.index();
        if let Some(pose) = self.sessions[i].pose {
            let shifted = pose.shifted(dx, 0);
            if self.fields[i].fits(shifted) {
                self.sessions[i].pose = Some(shifted);
            }
        }
    }

    /// Rotate by one step; a blocked rotation fails silently (no kicks).
    fn try_rotate(&mut self, player: Player, delta: i32) {
        if !self.accepts_play_command(player) {
            return;
        }
        let i = player.index();
        if let Some(pose) = self.sessions[i].pose {
            let rotated = pose.rotated(delta);
            if self.fields[i].fits(rotated) {
                self.sessions[i].pose = Some(rotated);
            }
        }
    }

    /// One player-driven gravity step, banking a drop-bonus point.
    fn soft_drop(&mut self, player: Player) {
        if !self.accepts_play_command(player) {
            return;
        }
        let i = player.index();
        let Some(pose) = self.sessions[i].pose else {
            return;
        };
        if self.fields[i].fits(pose.shifted(0, 1)) {
            self.sessions[i].drop_counter += 1;
            self.descend(player);
        }
    }

    /// Repeat soft-drop steps until the pose can no longer fall. The lock
    /// itself lands on the next gravity tick.
    fn hard_drop(&mut self, player: Player) {
        loop {
            if !self.accepts_play_command(player) {
                return;
            }
            let i = player.index();
            let Some(pose) = self.sessions[i].pose else {
                return;
            };
            if !self.fields[i].fits(pose.shifted(0, 1)) {
                return;
            }
            self.sessions[i].drop_counter += 1;
            self.descend(player);
        }
    }

    /// Drop key released: forfeit the pending bonus only if the piece is
    /// still falling. A release that races the lock keeps the bonus, so the
    /// held-key reward is paid exactly once per lock.
    fn drop_released(&mut self, player: Player) {
        if player == Player::Two && !self.two_players {
            return;
        }
        let i = player.index();
        if let Some(pose) = self.sessions[i].pose {
            if self.fields[i].fits(pose.shifted(0, 1)) {
                self.sessions[i].drop_counter = 0;
            }
        }
    }

    fn confirm(&mut self) {
        match self.phase {
            GamePhase::Title | GamePhase::GameOver => self.start_game(),
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused | GamePhase::AskRestart => self.phase = GamePhase::Running,
        }
    }

    fn restart(&mut self) {
        match self.phase {
            GamePhase::GameOver => {
                // Rematch at the level player one reached, for both players.
                let level = self.sessions[0].level;
                for session in &mut self.sessions {
                    session.level_on_restart = level;
                }
                self.start_game();
            }
            GamePhase::Running | GamePhase::Paused => self.phase = GamePhase::AskRestart,
            GamePhase::AskRestart => self.start_game(),
            GamePhase::Title => {}
        }
    }

    fn go_to_title(&mut self) {
        if matches!(self.phase, GamePhase::GameOver | GamePhase::AskRestart) {
            self.phase = GamePhase::Title;
            for session in &mut self.sessions {
                session.level_on_restart = 0;
            }
        }
    }

    fn toggle_player_count(&mut self) {
        if self.phase == GamePhase::Title {
            for session in &mut self.sessions {
                session.level_on_restart = 0;
            }
            self.two_players = !self.two_players;
        }
    }

    fn start_at_level(&mut self, level: u32) {
        if matches!(self.phase, GamePhase::Title | GamePhase::GameOver) {
            let level = level.min(MAX_START_LEVEL);
            for session in &mut self.sessions {
                session.level_on_restart = level;
            }
            self.start_game();
        }
    }

    /// Gravity period for a player's own timer.
    ///
    /// In two-player mode the period comes from the opponent's level - each
    /// player controls the other's speed. Single-player uses the own level.
    pub fn fall_delay_ms(&self, player: Player) -> u64 {
        let source = if self.two_players {
            player.opponent()
        } else {
            player
        };
        speed::fall_delay_ms(self.sessions[source.index()].level)
    }

    pub fn fall_delay(&self, player: Player) -> Duration {
        Duration::from_millis(self.fall_delay_ms(player))
    }

    /// Take the pending single-player settle pause request, if any.
    pub fn take_settle_pause(&mut self) -> bool {
        std::mem::take(&mut self.settle_pending)
    }

    /// True once after every `start_game`; resuming from a pause does not
    /// set it, so drivers only re-arm gravity timers on fresh games.
    pub fn take_game_started(&mut self) -> bool {
        std::mem::take(&mut self.started_pending)
    }

    /// Lowest row the active pose could reach by straight drop.
    pub fn landing_row(&self, player: Player) -> Option<i32> {
        let pose = self.sessions[player.index()].pose?;
        let field = &self.fields[player.index()];
        let mut y = pose.y;
        while field.fits(Pose { y: y + 1, ..pose }) {
            y += 1;
        }
        Some(y)
    }
}
