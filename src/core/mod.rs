//! Core module - pure game logic with no external dependencies
//!
//! Everything here is deterministic and I/O-free: the shape table, the
//! playfields, the biased piece generator, the speed model, the player
//! sessions and the engine that ties them together. Timing and terminals
//! live in the driver layers.

pub mod engine;
pub mod playfield;
pub mod player;
pub mod rng;
pub mod shapes;
pub mod snapshot;
pub mod speed;

// Re-export commonly used types
pub use engine::Engine;
pub use playfield::Playfield;
pub use player::PlayerSession;
pub use rng::{PieceGenerator, SimpleRng};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
