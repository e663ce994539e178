//! GameView: maps an engine snapshot into a terminal framebuffer
//!
//! Pure (no I/O), so the whole screen layout is unit-testable. The layout
//! follows the classic 80x25 text screen: player one's field on the left
//! with its stats panel beside it, player two's field and panel to the
//! right when two-player mode is on.
//!
//! While `Paused` or `AskRestart` the landed pieces, the active piece and
//! the guide are hidden (walls and the `=` clear markers still show), so a
//! paused opponent cannot study the stack.

use crossterm::style::Color;

use crate::core::shapes;
use crate::core::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::term::fb::FrameBuffer;
use crate::types::{GamePhase, PieceKind, Tile, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Top margin above the playfields.
const TOP: u16 = 2;
/// Left edge of player one's field.
const P1_FIELD_X: u16 = 4;
/// Gap between a field's right edge and its stats column.
const PANEL_GAP: u16 = 4;
/// Panel width; player two's field starts after player one's panel.
const PANEL_WIDTH: u16 = 26;

const P1_PANEL_X: u16 = P1_FIELD_X + PLAYFIELD_WIDTH as u16 + PANEL_GAP;
const P2_FIELD_X: u16 = P1_PANEL_X + PANEL_WIDTH;
const P2_PANEL_X: u16 = P2_FIELD_X + PLAYFIELD_WIDTH as u16 + PANEL_GAP;

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::DarkYellow,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
    }
}

/// Renders snapshots into framebuffers.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        match snap.phase {
            GamePhase::Title => self.render_title(snap, &mut fb),
            _ => self.render_game(snap, &mut fb),
        }
        fb
    }

    fn render_title(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        fb.put_str(30, 3, "D U O T R I S", Color::Cyan);
        fb.put_str(25, 5, "a two player tetromino duel", Color::Grey);

        fb.put_str(28, 9, "Press ENTER to start", Color::Reset);
        fb.put_str(
            16,
            11,
            "or press a number key to start from that level",
            Color::Reset,
        );
        fb.put_str(20, 12, "(hold CTRL or ALT to add 10 each)", Color::DarkGrey);

        let mode_line = if snap.two_players {
            "Two player mode is selected (press space to toggle)"
        } else {
            "One player mode is selected (press space to toggle)"
        };
        fb.put_str(14, 15, mode_line, Color::Reset);

        fb.put_str(
            10,
            18,
            "P1: arrows, N/M rotate    P2: WASD, Z/X rotate    Q quits",
            Color::DarkGrey,
        );
    }

    fn render_game(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        // Landed pieces (and the falling one) vanish while the game is
        // interrupted.
        let hide_pieces = matches!(snap.phase, GamePhase::Paused | GamePhase::AskRestart);

        self.draw_field(fb, &snap.players[0], P1_FIELD_X, hide_pieces);
        self.draw_stats(fb, &snap.players[0], P1_PANEL_X);
        self.draw_messages(fb, snap, P1_PANEL_X);

        if snap.two_players {
            self.draw_field(fb, &snap.players[1], P2_FIELD_X, hide_pieces);
            self.draw_stats(fb, &snap.players[1], P2_PANEL_X);
        }
    }

    fn draw_field(
        &self,
        fb: &mut FrameBuffer,
        player: &PlayerSnapshot,
        origin_x: u16,
        hide_pieces: bool,
    ) {
        for (y, row) in player.grid.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let (ch, fg) = match tile {
                    Tile::Wall => ('#', Color::DarkGrey),
                    Tile::Cleared => ('=', Color::White),
                    Tile::Empty => (' ', Color::Reset),
                    Tile::Filled(kind) if !hide_pieces => (kind.letter(), piece_color(*kind)),
                    Tile::Filled(_) => (' ', Color::Reset),
                };
                fb.put_char(origin_x + x as u16, TOP + y as u16, ch, fg);
            }
        }

        if hide_pieces {
            return;
        }
        let Some(pose) = player.active else {
            return;
        };

        // Guide first so the piece overrides it where they overlap.
        if let Some(guide_y) = player.guide_row {
            self.draw_pose_cells(fb, origin_x, pose.kind, pose.rotation, pose.x, guide_y, |_| {
                ('.', Color::DarkGrey)
            });
        }
        self.draw_pose_cells(fb, origin_x, pose.kind, pose.rotation, pose.x, pose.y, |kind| {
            (kind.letter().to_ascii_lowercase(), piece_color(kind))
        });
    }

    fn draw_pose_cells(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        kind: PieceKind,
        rotation: i32,
        pose_x: i32,
        pose_y: i32,
        cell: impl Fn(PieceKind) -> (char, Color),
    ) {
        for y in 0..4 {
            for x in 0..4 {
                if !shapes::occupies(kind, rotation, x, y) {
                    continue;
                }
                let gx = pose_x + x as i32;
                let gy = pose_y + y as i32;
                if gx < 0 || gy < 0 {
                    continue;
                }
                let (ch, fg) = cell(kind);
                fb.put_char(origin_x + gx as u16, TOP + gy as u16, ch, fg);
            }
        }
    }

    fn draw_stats(&self, fb: &mut FrameBuffer, player: &PlayerSnapshot, x: u16) {
        fb.put_str(x, TOP, &format!("Score: {}", player.score), Color::Reset);
        fb.put_str(x, TOP + 1, &format!("Top  : {}", player.top), Color::Reset);
        fb.put_str(x, TOP + 3, &format!("Lines: {}", player.lines), Color::Reset);
        fb.put_str(x, TOP + 5, &format!("Level: {}", player.level), Color::Reset);

        // Top two rows of the next shape, unrotated; two rows are enough
        // for every spawn orientation.
        fb.put_str(x, TOP + 7, "Next : ", Color::Reset);
        let color = piece_color(player.next);
        for row in 0..2u16 {
            for col in 0..4u16 {
                if shapes::occupies(player.next, 0, col as usize, row as usize) {
                    fb.put_char(x + 7 + col, TOP + 7 + row, player.next.letter(), color);
                }
            }
        }
    }

    /// Phase banners go on player one's panel; the left half of the screen
    /// carries all global status lines.
    fn draw_messages(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16) {
        let status = match snap.phase {
            GamePhase::GameOver if !snap.two_players => Some("GAME OVER"),
            GamePhase::GameOver if snap.players[0].lost => Some("PLAYER TWO WINS"),
            GamePhase::GameOver if snap.players[1].lost => Some("PLAYER ONE WINS"),
            GamePhase::Paused => Some("PAUSED"),
            GamePhase::AskRestart => Some("Press R to restart."),
            _ => None,
        };
        if let Some(status) = status {
            fb.put_str(x, TOP + 10, status, Color::White);
        }

        let prompt = match snap.phase {
            GamePhase::GameOver => Some("Press ENTER to restart."),
            GamePhase::Paused | GamePhase::AskRestart => Some("Press ENTER to resume."),
            _ => None,
        };
        if let Some(prompt) = prompt {
            fb.put_str(x, TOP + 12, prompt, Color::Grey);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Engine;
    use crate::types::{Command, Player};

    fn text(fb: &FrameBuffer) -> Vec<String> {
        (0..fb.height())
            .map(|y| fb.row(y).iter().map(|c| c.ch).collect())
            .collect()
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        text(fb).iter().any(|line| line.contains(needle))
    }

    fn render(engine: &Engine) -> FrameBuffer {
        GameView.render(&engine.snapshot(), Viewport::new(100, 25))
    }

    #[test]
    fn test_title_screen_shows_mode_line() {
        let mut engine = Engine::new(1);
        let fb = render(&engine);
        assert!(contains(&fb, "Press ENTER to start"));
        assert!(contains(&fb, "One player mode is selected"));

        engine.handle(Command::TogglePlayerCount);
        let fb = render(&engine);
        assert!(contains(&fb, "Two player mode is selected"));
    }

    #[test]
    fn test_running_game_draws_walls_and_stats() {
        let mut engine = Engine::new(1);
        engine.handle(Command::Confirm);
        let fb = render(&engine);

        // Floor row of player one's field.
        let floor: String = (0..PLAYFIELD_WIDTH as u16)
            .map(|x| {
                fb.get(P1_FIELD_X + x, TOP + PLAYFIELD_HEIGHT as u16 - 1)
                    .unwrap()
                    .ch
            })
            .collect();
        assert_eq!(floor, "#".repeat(PLAYFIELD_WIDTH));

        assert!(contains(&fb, "Score: 0"));
        assert!(contains(&fb, "Top  : 21519"));
        assert!(contains(&fb, "Next : "));
    }

    /// Screen coordinates of the active pose's occupied cells.
    fn active_cells(engine: &Engine) -> Vec<(u16, u16)> {
        let pose = engine.session(Player::One).pose().unwrap();
        let mut out = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                if shapes::occupies(pose.kind, pose.rotation, x, y) {
                    let gx = (pose.x + x as i32) as u16;
                    let gy = (pose.y + y as i32) as u16;
                    out.push((P1_FIELD_X + gx, TOP + gy));
                }
            }
        }
        out
    }

    #[test]
    fn test_active_piece_renders_lowercase_at_its_cells() {
        let mut engine = Engine::new(1);
        engine.handle(Command::Confirm);
        let kind = engine.session(Player::One).pose().unwrap().kind;
        let fb = render(&engine);
        for (x, y) in active_cells(&engine) {
            assert_eq!(fb.get(x, y).unwrap().ch, kind.letter().to_ascii_lowercase());
        }
    }

    #[test]
    fn test_pause_hides_the_active_piece_and_shows_banner() {
        let mut engine = Engine::new(1);
        engine.handle(Command::Confirm);
        engine.handle(Command::Confirm); // pause

        let fb = render(&engine);
        assert!(contains(&fb, "PAUSED"));
        assert!(contains(&fb, "Press ENTER to resume."));
        for (x, y) in active_cells(&engine) {
            assert_eq!(fb.get(x, y).unwrap().ch, ' ');
        }
    }

    #[test]
    fn test_second_field_only_in_two_player_mode() {
        let mut engine = Engine::new(1);
        engine.handle(Command::Confirm);
        let fb = render(&engine);
        assert!(fb.get(P2_FIELD_X, TOP).unwrap().ch == ' ');

        let mut engine = Engine::new(1);
        engine.handle(Command::TogglePlayerCount);
        engine.handle(Command::Confirm);
        let fb = render(&engine);
        assert_eq!(fb.get(P2_FIELD_X, TOP).unwrap().ch, '#');
    }
}
