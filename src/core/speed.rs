//! Speed model - level to gravity-period mapping
//!
//! Delays are stored as frame counts at a 60 Hz reference and converted to
//! milliseconds. In two-player mode the engine feeds this function the
//! *opponent's* level: clearing lines speeds the other player up.

/// Frames between gravity steps per level (NES table). Levels past the end
/// of the table run at 1 frame.
pub const FALL_FRAMES: [u32; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    1,
];

/// Gravity period in milliseconds for a level.
pub fn fall_delay_ms(level: u32) -> u64 {
    let frames = if level >= 29 {
        1
    } else {
        FALL_FRAMES[level as usize]
    };
    u64::from(frames) * 1000 / 60
}
