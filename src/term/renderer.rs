//! TerminalRenderer: flushes a framebuffer to a real terminal
//!
//! Full-frame redraws only: two 12x18 boards plus panels are far below the
//! point where diffing would pay for its bookkeeping.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::FrameBuffer;

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current_fg: Option<Color> = None;
        for y in 0..fb.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for cell in fb.row(y) {
                if current_fg != Some(cell.fg) {
                    self.stdout.queue(SetForegroundColor(cell.fg))?;
                    current_fg = Some(cell.fg);
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
