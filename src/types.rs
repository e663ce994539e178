//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Playfield dimensions including the permanent wall ring
/// (column 0, column 11 and row 17 are walls; the play area is 10x17).
pub const PLAYFIELD_WIDTH: usize = 12;
pub const PLAYFIELD_HEIGHT: usize = 18;

/// Spawn column for new pieces (one left of center reads as centered
/// because the shape boxes are left-aligned).
pub const SPAWN_X: i32 = PLAYFIELD_WIDTH as i32 / 2 - 1;

/// Line clear scoring (NES rules), indexed by rows cleared at once.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed per level-up.
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest selectable / speed-table level.
pub const MAX_START_LEVEL: u32 = 29;

/// A lock with the pose's top above this row leaves the next gravity tick
/// piece-holding (row collapse only), giving the player one extra beat in a
/// crowded field.
pub const HIGH_LOCK_ROW: i32 = 6;

/// Non-interactive pause after a lock in single-player mode (milliseconds).
pub const SETTLE_PAUSE_MS: u64 = 200;

/// Default top score shown before anyone beats it.
pub const INITIAL_TOP_SCORE: u32 = 21519;

/// Tetromino piece kinds, in shape-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Index into the shape table (0-6).
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Display letter, recoverable from a landed cell.
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

/// One cell of a playfield.
///
/// Landed cells keep their piece kind so the renderer can recover the
/// letter/color from the cell itself. `Cleared` is a transient marker set
/// when a row fills; the row physically vanishes on the next gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Cleared,
    Filled(PieceKind),
}

impl Tile {
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }
}

/// A falling piece: shape, rotation and board position.
///
/// `rotation` is stored unbounded and reduced mod 4 only at shape-table
/// lookup, so N clockwise rotations are always undone by N counter-clockwise
/// ones without any snapping of the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub kind: PieceKind,
    pub rotation: i32,
    pub x: i32,
    pub y: i32,
}

impl Pose {
    /// A fresh piece at the spawn position.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: 0,
        }
    }

    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn rotated(self, delta: i32) -> Self {
        Self {
            rotation: self.rotation + delta,
            ..self
        }
    }
}

/// Global game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Title,
    Running,
    Paused,
    GameOver,
    AskRestart,
}

/// Player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Discrete intents delivered by the driver.
///
/// Commands invalid for the current phase (or addressed to player two in
/// single-player mode) are silently ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft(Player),
    MoveRight(Player),
    SoftDrop(Player),
    HardDrop(Player),
    RotateCcw(Player),
    RotateCw(Player),
    /// The soft/hard drop key was released.
    DropReleased(Player),
    /// Start / pause / resume, depending on phase.
    Confirm,
    /// Ask to restart, confirm a restart, or restart after game over.
    Restart,
    /// Back to the title screen.
    GoToTitle,
    /// Switch between one and two player mode (title screen only).
    TogglePlayerCount,
    /// Start a fresh game at the given level (clamped to 29).
    StartAtLevel(u32),
}
