use anyhow::Result;

use crate::frame::FrameBuffer;
use crate::state::ControlKey;

/// Provides decoded frames to the playback loop.
///
/// Implemented by `VideoSource` (ffmpeg pipe); scheduler tests use scripted
/// implementations.
///
/// # Example
/// ```
/// use ap_core::traits::FrameSource;
/// use ap_core::frame::FrameBuffer;
///
/// struct Empty;
/// impl FrameSource for Empty {
///     fn nominal_fps(&self) -> f64 { 30.0 }
///     fn total_frames(&self) -> u64 { 0 }
///     fn next_frame(&mut self) -> anyhow::Result<Option<FrameBuffer>> { Ok(None) }
///     fn close(&mut self) {}
/// }
/// ```
pub trait FrameSource {
    /// Container-reported frame rate. May be zero or nonsense for some
    /// formats; the scheduler applies a fallback.
    fn nominal_fps(&self) -> f64;

    /// Total frame count from container metadata, 0 if unknown.
    fn total_frames(&self) -> u64;

    /// Pull the next decoded frame.
    ///
    /// `Ok(None)` signals end of stream. An `Err` ends playback through the
    /// same stopping path; there is no retry.
    ///
    /// # Errors
    /// Returns an error on a failed or malformed decode.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>>;

    /// Release the decoder. Must be idempotent.
    fn close(&mut self);
}

/// Clear-and-write text sink the renderer draws into.
///
/// Full repaint each tick: `clear` then one `write` holding the whole
/// glyph grid plus the status line.
pub trait DisplaySurface {
    /// Erase the previous frame's visible contents.
    ///
    /// # Errors
    /// Returns an error if the underlying terminal write fails.
    fn clear(&mut self) -> std::io::Result<()>;

    /// Write one composed frame.
    ///
    /// # Errors
    /// Returns an error if the underlying terminal write fails.
    fn write(&mut self, text: &str) -> std::io::Result<()>;
}

/// Non-blocking control-key detection.
///
/// `poll` must never block: it returns a pending key or `None`, and any
/// input-mode change it makes is restored before returning.
pub trait ControlInput {
    /// Next pending control key, if any.
    fn poll(&mut self) -> Option<ControlKey>;
}

/// Handle to the companion audio process.
///
/// # Example
/// ```
/// use ap_core::traits::AudioSink;
///
/// struct Silent;
/// impl AudioSink for Silent {
///     fn stop(&mut self) {}
///     fn is_running(&mut self) -> bool { false }
/// }
/// ```
pub trait AudioSink {
    /// Terminate the process if running. Idempotent.
    fn stop(&mut self);

    /// `true` while the child process is alive.
    fn is_running(&mut self) -> bool;
}
