use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use ap_ascii::{glyph_frame, luminance_grid, scale_to};
use ap_core::clock::FrameClock;
use ap_core::config::PlayerConfig;
use ap_core::error::PlayerError;
use ap_core::ramp::GlyphRamp;
use ap_core::state::PlaybackState;
use ap_core::traits::{AudioSink, ControlInput, DisplaySurface, FrameSource};
use ap_render::format_status;

/// Why playback left the running loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The source ran out of frames.
    EndOfStream,
    /// Quit key or interrupt.
    Quit,
    /// The decoder failed; the stream ends rather than retrying.
    DecodeError,
}

/// The playback scheduler: drives the per-tick pipeline and keeps cumulative
/// playback time locked to the wall clock.
///
/// Single-threaded and cooperative. The scheduler is the only writer of the
/// playback state and the only user of the clock, so no locking exists
/// anywhere in the loop. The audio companion is a separate OS process
/// coordinated purely by start/terminate.
pub struct Player {
    config: PlayerConfig,
    grid_w: u16,
    grid_h: u16,
    ramp: GlyphRamp,
    interrupted: Arc<AtomicBool>,
    scratch: String,
}

impl Player {
    /// Scheduler for one playback session on the given glyph grid.
    #[must_use]
    pub fn new(config: PlayerConfig, grid: (u16, u16), interrupted: Arc<AtomicBool>) -> Self {
        let ramp = GlyphRamp::new(&config.ramp);
        Self {
            config,
            grid_w: grid.0,
            grid_h: grid.1,
            ramp,
            interrupted,
            scratch: String::new(),
        }
    }

    /// Run playback to completion.
    ///
    /// Teardown (stopping the audio companion, closing the source) runs
    /// on every exit path: end of stream, quit key, interrupt, decode error.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        audio: &mut dyn AudioSink,
        surface: &mut dyn DisplaySurface,
        input: &mut dyn ControlInput,
    ) -> StopReason {
        let mut state = PlaybackState::new(self.config.speed_min, self.config.speed_max);
        let mut clock = FrameClock::from_fps(source.nominal_fps());
        let total_frames = source.total_frames();

        let reason =
            self.run_loop(source, audio, surface, input, &mut state, &mut clock, total_frames);

        audio.stop();
        source.close();
        log::info!(
            "playback stopped after {} frames: {reason:?}",
            clock.frames()
        );
        reason
    }

    #[allow(clippy::too_many_arguments)]
    fn run_loop(
        &mut self,
        source: &mut dyn FrameSource,
        audio: &mut dyn AudioSink,
        surface: &mut dyn DisplaySurface,
        input: &mut dyn ControlInput,
        state: &mut PlaybackState,
        clock: &mut FrameClock,
        total_frames: u64,
    ) -> StopReason {
        let mut pause_started: Option<Instant> = None;
        let mut audio_live = audio.is_running();

        loop {
            if self.interrupted.load(Ordering::Relaxed) {
                state.request_quit();
            }
            if let Some(key) = input.poll() {
                state.apply(key);
            }
            if state.quit {
                return StopReason::Quit;
            }

            if audio_live && !audio.is_running() {
                audio_live = false;
                log::info!("audio companion ended before the video");
            }

            // Paused: idle and re-poll, no frame advancement, no clock
            // accounting. The pause interval is excluded on resume so the
            // schedule does not fast-forward to catch up.
            if state.paused {
                if pause_started.is_none() {
                    pause_started = Some(Instant::now());
                }
                thread::sleep(Duration::from_millis(self.config.pause_poll_ms));
                continue;
            }
            if let Some(started) = pause_started.take() {
                clock.exclude(started.elapsed());
            }

            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => return StopReason::EndOfStream,
                Err(e) => {
                    log::warn!("decode failed, ending stream: {e:#}");
                    return StopReason::DecodeError;
                }
            };

            let grid = luminance_grid(
                &frame,
                self.config.contrast_alpha,
                self.config.contrast_beta,
                self.config.gamma,
            );
            let scaled = match scale_to(&grid, self.grid_w, self.grid_h) {
                Ok(scaled) => scaled,
                Err(e) => {
                    log::warn!("skipping invalid frame: {e}");
                    continue;
                }
            };
            let glyphs = glyph_frame(&scaled, &self.ramp);

            // The anchor is the wall-clock time of the first rendered frame.
            clock.start_at(Instant::now());
            clock.mark_rendered();

            self.scratch.clear();
            glyphs.write_to(&mut self.scratch);
            let now = Instant::now();
            self.scratch.push_str(&format_status(
                clock.elapsed_at(now),
                clock.frames(),
                total_frames,
                state.speed,
            ));
            self.scratch.push('\n');

            if let Err(e) = surface.clear().and_then(|()| surface.write(&self.scratch)) {
                log::warn!("{}, frame skipped", PlayerError::DisplayWrite(e));
            }

            // Sleep the residual, not a fixed delay: render cost is variable
            // and speed can change mid-playback. A late frame sleeps zero and
            // playback degrades in rate instead of dropping frames.
            let residual = clock.residual_at(Instant::now(), state.speed);
            if !residual.is_zero() {
                thread::sleep(residual);
            }
        }
    }
}
