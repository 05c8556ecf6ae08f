/// A control key observed by the input monitor.
///
/// The monitor only detects; the scheduler applies the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKey {
    /// Stop playback and tear down.
    Quit,
    /// Toggle pause on/off.
    TogglePause,
    /// Multiply the speed by 1.1, clamped to the upper bound.
    SpeedUp,
    /// Multiply the speed by 0.9, clamped to the lower bound.
    SpeedDown,
}

/// Mutable playback state for one session.
///
/// Single-writer by construction: only the scheduler tick mutates it, by
/// applying keys the input monitor observed. No locking is needed.
///
/// # Example
/// ```
/// use ap_core::state::{ControlKey, PlaybackState};
/// let mut state = PlaybackState::new(0.1, 3.0);
/// state.apply(ControlKey::TogglePause);
/// assert!(state.paused);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackState {
    /// Frame advancement suspended.
    pub paused: bool,
    /// Current speed multiplier.
    pub speed: f32,
    /// Quit requested by key or interrupt.
    pub quit: bool,
    speed_min: f32,
    speed_max: f32,
}

impl PlaybackState {
    /// Fresh state at 1.0× speed with the given multiplier bounds.
    #[must_use]
    pub fn new(speed_min: f32, speed_max: f32) -> Self {
        Self {
            paused: false,
            speed: 1.0,
            quit: false,
            speed_min,
            speed_max,
        }
    }

    /// Apply the effect of one observed control key.
    pub fn apply(&mut self, key: ControlKey) {
        match key {
            ControlKey::Quit => self.quit = true,
            ControlKey::TogglePause => self.paused = !self.paused,
            ControlKey::SpeedUp => self.speed = (self.speed * 1.1).min(self.speed_max),
            ControlKey::SpeedDown => self.speed = (self.speed * 0.9).max(self.speed_min),
        }
    }

    /// Request termination from outside the key path (Ctrl-C handler flag).
    pub fn request_quit(&mut self) {
        self.quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_toggles() {
        let mut state = PlaybackState::new(0.1, 3.0);
        state.apply(ControlKey::TogglePause);
        assert!(state.paused);
        state.apply(ControlKey::TogglePause);
        assert!(!state.paused);
    }

    #[test]
    fn speed_never_exceeds_upper_bound() {
        let mut state = PlaybackState::new(0.1, 3.0);
        for _ in 0..200 {
            state.apply(ControlKey::SpeedUp);
        }
        assert!(state.speed <= 3.0);
        assert!((state.speed - 3.0).abs() < 1e-6);
    }

    #[test]
    fn speed_never_drops_below_lower_bound() {
        let mut state = PlaybackState::new(0.1, 3.0);
        for _ in 0..200 {
            state.apply(ControlKey::SpeedDown);
        }
        assert!(state.speed >= 0.1);
        assert!((state.speed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn quit_is_sticky() {
        let mut state = PlaybackState::new(0.1, 3.0);
        state.apply(ControlKey::Quit);
        state.apply(ControlKey::TogglePause);
        assert!(state.quit);
    }
}
