//! duotris runner (default binary).
//!
//! Single-threaded driver loop: render a snapshot, poll input until the
//! nearest gravity deadline, deliver due ticks, honor the single-player
//! settle pause. Each player has an independent gravity deadline re-armed
//! from `Engine::fall_delay`, so the two-player speed swap takes effect on
//! the very next tick.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use duotris::core::{Engine, GameSnapshot};
use duotris::input::{map_key_press, map_key_release, should_quit};
use duotris::term::{GameView, TerminalRenderer, Viewport};
use duotris::types::{Player, SETTLE_PAUSE_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Seed the shared RNG from the clock. Games within one process share the
/// stream.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut engine = Engine::new(clock_seed());
    let view = GameView;
    let mut snapshot = GameSnapshot::default();

    let now = Instant::now();
    let mut deadlines = [
        now + engine.fall_delay(Player::One),
        now + engine.fall_delay(Player::Two),
    ];

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 25));
        engine.snapshot_into(&mut snapshot);
        let fb = view.render(&snapshot, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input, with a timeout to the nearest gravity deadline. The cap
        // keeps idle screens (title, game over) responsive to resizes.
        let now = Instant::now();
        let next_deadline = deadlines[0].min(deadlines[1]);
        let timeout = next_deadline
            .saturating_duration_since(now)
            .min(Duration::from_millis(50));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(command) = map_key_press(key, engine.two_players()) {
                            engine.handle(command);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = map_key_release(key) {
                            engine.handle(command);
                        }
                    }
                }
            }
        }

        // A fresh game re-arms both timers.
        if engine.take_game_started() {
            let now = Instant::now();
            for player in Player::BOTH {
                deadlines[player.index()] = now + engine.fall_delay(player);
            }
        }

        // Deliver due gravity ticks. The engine gates their effects by
        // phase, so the timers simply keep running while paused.
        let now = Instant::now();
        for player in Player::BOTH {
            let i = player.index();
            if now >= deadlines[i] {
                engine.gravity_tick(player);
                deadlines[i] = now + engine.fall_delay(player);
            }
        }

        // Single-player settle: a short non-interactive breather after a
        // lock, discarding whatever input queued up during it.
        if engine.take_settle_pause() {
            thread::sleep(Duration::from_millis(SETTLE_PAUSE_MS));
            while event::poll(Duration::from_millis(0))? {
                let _ = event::read()?;
            }
        }
    }
}
