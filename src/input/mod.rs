//! Key to command mapping for the terminal driver
//!
//! Pure translation layer: no state, no timing. Player one plays on the
//! arrow keys with N/M rotation; player two on WASD with Z/X. In
//! single-player mode Z/X drive player one instead, keeping the classic
//! one-player bindings alive. Everything phase-dependent (which keys do
//! anything right now) is the engine's business - this layer always maps.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Command, Player};

/// Whether a key press should quit the program (the engine has no quit
/// concept; this belongs to the terminal driver).
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}

/// Map a key press to a command.
///
/// `two_players` decides who owns the shared Z/X rotation keys and is read
/// from the engine each frame.
pub fn map_key_press(key: KeyEvent, two_players: bool) -> Option<Command> {
    // Z/X belonged to player one before the second player arrived; they
    // follow player two only when that player exists.
    let zx_player = if two_players {
        Player::Two
    } else {
        Player::One
    };

    match key.code {
        KeyCode::Left => Some(Command::MoveLeft(Player::One)),
        KeyCode::Right => Some(Command::MoveRight(Player::One)),
        KeyCode::Down => Some(Command::SoftDrop(Player::One)),
        KeyCode::Up => Some(Command::HardDrop(Player::One)),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char(' ') => Some(Command::TogglePlayerCount),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'n' => Some(Command::RotateCcw(Player::One)),
            'm' => Some(Command::RotateCw(Player::One)),
            'a' => Some(Command::MoveLeft(Player::Two)),
            'd' => Some(Command::MoveRight(Player::Two)),
            's' => Some(Command::SoftDrop(Player::Two)),
            'w' => Some(Command::HardDrop(Player::Two)),
            'z' => Some(Command::RotateCcw(zx_player)),
            'x' => Some(Command::RotateCw(zx_player)),
            'r' => Some(Command::Restart),
            't' => Some(Command::GoToTitle),
            digit @ '0'..='9' => Some(Command::StartAtLevel(start_level(digit, key.modifiers))),
            _ => None,
        },
        _ => None,
    }
}

/// Map a key release to a command (drop-bonus bookkeeping only). Terminals
/// without release events simply never emit these.
pub fn map_key_release(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Down | KeyCode::Up => Some(Command::DropReleased(Player::One)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            's' | 'w' => Some(Command::DropReleased(Player::Two)),
            _ => None,
        },
        _ => None,
    }
}

/// Digit keys pick the start level; Ctrl and Alt each add 10.
fn start_level(digit: char, modifiers: KeyModifiers) -> u32 {
    let mut level = digit as u32 - '0' as u32;
    if modifiers.contains(KeyModifiers::CONTROL) {
        level += 10;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        level += 10;
    }
    level
}
