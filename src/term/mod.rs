//! Terminal rendering layer
//!
//! A small game-oriented pipeline: the pure `game_view` maps engine
//! snapshots into a character framebuffer, and `renderer` flushes frames to
//! the real terminal. Keeping the view pure keeps the whole screen layout
//! unit-testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
