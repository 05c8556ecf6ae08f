use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use ap_core::error::PlayerError;
use ap_core::state::ControlKey;
use ap_core::traits::ControlInput;

/// Map a key event to its control action, if any.
///
/// Unknown keys are ignored; only key presses count (no repeat/release).
#[must_use]
pub fn map_key(key: &KeyEvent) -> Option<ControlKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(ControlKey::Quit);
    }
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(ControlKey::Quit),
        KeyCode::Char(' ') => Some(ControlKey::TogglePause),
        KeyCode::Char('+' | '=') => Some(ControlKey::SpeedUp),
        KeyCode::Char('-') => Some(ControlKey::SpeedDown),
        _ => None,
    }
}

/// Restores the terminal's previous raw-mode state on drop, so a poll never
/// leaves a mode change behind.
struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(Self { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_raw {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Non-blocking control-key monitor over crossterm events.
///
/// Each `poll` enables raw mode, checks for a pending event with a zero
/// timeout, and restores the previous mode before returning. Any input
/// failure is treated as "no key pressed", since stalling the render loop
/// over input would be worse than missing a keystroke.
pub struct KeyMonitor;

impl KeyMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlInput for KeyMonitor {
    fn poll(&mut self) -> Option<ControlKey> {
        let _guard = match RawModeGuard::enable() {
            Ok(guard) => guard,
            Err(e) => {
                log::debug!("{}", PlayerError::InputUnavailable(e.to_string()));
                return None;
            }
        };

        match event::poll(Duration::ZERO) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => map_key(&key),
                Ok(_) => None,
                Err(e) => {
                    log::debug!("{}", PlayerError::InputUnavailable(e.to_string()));
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                log::debug!("{}", PlayerError::InputUnavailable(e.to_string()));
                None
            }
        }
    }
}
