//! duotris: one or two simultaneous playfields in one terminal, NES-style
//! scoring and speed, and a versus twist - in two-player mode each player's
//! fall speed is set by the *opponent's* level.
//!
//! `core` holds the deterministic engine; `term` and `input` are the
//! terminal driver layers consumed by the binary.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
