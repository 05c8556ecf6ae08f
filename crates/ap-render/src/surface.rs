use std::io::{Stdout, Write};

use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute, queue};

use ap_core::config::PlayerConfig;
use ap_core::traits::DisplaySurface;

/// Terminal-backed display surface.
///
/// Repaints fully each tick: clear, then one write holding the whole glyph
/// grid and status line. No diffing; the simplicity avoids cursor-positioning
/// bugs when successive frames differ in shape. The cursor is hidden for the
/// surface's lifetime and restored on drop.
pub struct TermSurface {
    out: Stdout,
}

impl TermSurface {
    /// Take over stdout for playback.
    ///
    /// # Errors
    /// Returns an error if the terminal rejects the initial cursor command.
    pub fn new() -> std::io::Result<Self> {
        let mut out = std::io::stdout();
        execute!(out, cursor::Hide)?;
        Ok(Self { out })
    }
}

impl DisplaySurface for TermSurface {
    fn clear(&mut self) -> std::io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0), Clear(ClearType::All))
    }

    fn write(&mut self, text: &str) -> std::io::Result<()> {
        queue!(self.out, Print(text))?;
        self.out.flush()
    }
}

impl Drop for TermSurface {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show);
    }
}

/// Pick the target glyph grid for a session.
///
/// Fullscreen uses the configured preset directly. Windowed mode consults
/// the terminal size once, clamped to the configured maxima; if the size
/// cannot be discovered, the windowed preset applies.
#[must_use]
pub fn discover_grid(config: &PlayerConfig, fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        return config.grid_preset(true);
    }
    match crossterm::terminal::size() {
        Ok((columns, rows)) => config.clamp_to_terminal(columns, rows),
        Err(e) => {
            log::debug!("terminal size unavailable ({e}), using windowed preset");
            config.grid_preset(false)
        }
    }
}
