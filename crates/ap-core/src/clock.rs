use std::time::{Duration, Instant};

/// Nominal rate used when the container reports a zero or negative fps.
const FALLBACK_FPS: f64 = 30.0;

/// Wall-clock pacing anchor for drift-free playback.
///
/// Records the timestamp of the first rendered frame plus a rendered-frame
/// counter. The expected presentation time of frame N is
/// `anchor + N × frame_duration / speed`; the scheduler sleeps the residual
/// between expected and actual, so variable render cost never accumulates
/// into drift. Pause time is excluded by shifting the anchor forward.
///
/// All time-dependent methods take an explicit `now` so tests can drive the
/// clock deterministically.
///
/// # Example
/// ```
/// use std::time::{Duration, Instant};
/// use ap_core::clock::FrameClock;
/// let mut clock = FrameClock::from_fps(25.0);
/// let t0 = Instant::now();
/// clock.start_at(t0);
/// clock.mark_rendered();
/// assert_eq!(clock.expected(1.0), Duration::from_millis(40));
/// ```
#[derive(Clone, Debug)]
pub struct FrameClock {
    anchor: Option<Instant>,
    frame_duration: Duration,
    frames: u64,
}

impl FrameClock {
    /// Clock with an explicit nominal frame duration.
    #[must_use]
    pub fn new(frame_duration: Duration) -> Self {
        Self {
            anchor: None,
            frame_duration,
            frames: 0,
        }
    }

    /// Clock from a container-reported frame rate.
    ///
    /// A zero or negative rate falls back to 30 fps rather than letting an
    /// invalid duration reach the pacing formula.
    #[must_use]
    pub fn from_fps(fps: f64) -> Self {
        let fps = if fps > 0.0 {
            fps
        } else {
            log::warn!("container reported {fps} fps, falling back to {FALLBACK_FPS}");
            FALLBACK_FPS
        };
        Self::new(Duration::from_secs_f64(1.0 / fps))
    }

    /// Nominal duration of one frame at 1.0× speed.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Establish the anchor at the first rendered frame. Later calls are
    /// no-ops; the anchor is never reset within a session.
    pub fn start_at(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Count one rendered frame.
    pub fn mark_rendered(&mut self) {
        self.frames += 1;
    }

    /// Rendered-frame counter.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Expected presentation offset of the last rendered frame, relative to
    /// the anchor: `frames × frame_duration / speed`.
    #[must_use]
    pub fn expected(&self, speed: f32) -> Duration {
        let secs = self.frames as f64 * self.frame_duration.as_secs_f64() / f64::from(speed);
        Duration::from_secs_f64(secs.max(0.0))
    }

    /// Accounted playback time at `now`. Zero before the anchor is set;
    /// excluded pause time does not count.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.anchor
            .map_or(Duration::ZERO, |a| now.saturating_duration_since(a))
    }

    /// Residual sleep needed to hold the schedule:
    /// `max(0, expected − elapsed)`. Zero when rendering is running behind
    /// (natural rate degradation, no frame dropping).
    #[must_use]
    pub fn residual_at(&self, now: Instant, speed: f32) -> Duration {
        self.expected(speed).saturating_sub(self.elapsed_at(now))
    }

    /// Exclude a pause interval from accounted time by shifting the anchor
    /// forward, leaving the anchor-relative schedule untouched.
    pub fn exclude(&mut self, paused_for: Duration) {
        if let Some(a) = self.anchor {
            self.anchor = Some(a + paused_for);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(fps: f64, t0: Instant) -> FrameClock {
        let mut clock = FrameClock::from_fps(fps);
        clock.start_at(t0);
        clock
    }

    #[test]
    fn expected_times_follow_nominal_rate() {
        let t0 = Instant::now();
        let mut clock = clock_at(25.0, t0);
        for n in 1..=10u32 {
            clock.mark_rendered();
            assert_eq!(clock.expected(1.0), Duration::from_millis(u64::from(n) * 40));
        }
    }

    #[test]
    fn residual_is_expected_minus_render_cost() {
        let t0 = Instant::now();
        let mut clock = clock_at(25.0, t0);
        clock.mark_rendered();
        // 15 ms of render cost leaves 25 ms of the 40 ms budget.
        let now = t0 + Duration::from_millis(15);
        assert_eq!(clock.residual_at(now, 1.0), Duration::from_millis(25));
    }

    #[test]
    fn residual_saturates_when_running_behind() {
        let t0 = Instant::now();
        let mut clock = clock_at(25.0, t0);
        clock.mark_rendered();
        let now = t0 + Duration::from_millis(200);
        assert_eq!(clock.residual_at(now, 1.0), Duration::ZERO);
    }

    #[test]
    fn speed_change_compresses_subsequent_schedule() {
        let t0 = Instant::now();
        let mut clock = clock_at(25.0, t0);
        for _ in 0..10 {
            clock.mark_rendered();
        }
        assert_eq!(clock.expected(1.0), Duration::from_millis(400));
        // Doubling the speed halves the expected times; the rendered count
        // is untouched.
        assert_eq!(clock.expected(2.0), Duration::from_millis(200));
        assert_eq!(clock.frames(), 10);
    }

    #[test]
    fn pause_exclusion_leaves_schedule_unaffected() {
        let t0 = Instant::now();
        let mut clock = clock_at(25.0, t0);
        clock.mark_rendered();
        let before_pause = t0 + Duration::from_millis(10);
        let residual_before = clock.residual_at(before_pause, 1.0);

        // Pause for 5 s, then exclude it: the residual at the shifted "same
        // instant" must match what it was before the pause.
        let pause = Duration::from_secs(5);
        clock.exclude(pause);
        let after_pause = before_pause + pause;
        assert_eq!(clock.residual_at(after_pause, 1.0), residual_before);
        assert_eq!(clock.elapsed_at(after_pause), Duration::from_millis(10));
    }

    #[test]
    fn invalid_fps_falls_back_to_thirty() {
        let clock = FrameClock::from_fps(0.0);
        let expected = Duration::from_secs_f64(1.0 / 30.0);
        assert_eq!(clock.frame_duration(), expected);
        let clock = FrameClock::from_fps(-5.0);
        assert_eq!(clock.frame_duration(), expected);
    }

    #[test]
    fn anchor_is_set_once() {
        let t0 = Instant::now();
        let mut clock = clock_at(25.0, t0);
        clock.start_at(t0 + Duration::from_secs(1));
        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(2)), Duration::from_secs(2));
    }
}
