use thiserror::Error;

/// Errors produced by the playback pipeline.
///
/// Only the source-open variants abort playback; everything else is
/// reported and the loop keeps running.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Referenced media file does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// Path that was not found.
        path: String,
    },

    /// File exists but could not be opened or probed as video.
    #[error("could not open source {path}: {reason}")]
    SourceUnopenable {
        /// Path that failed to open.
        path: String,
        /// Probe or spawn failure detail.
        reason: String,
    },

    /// Zero-area or malformed decoded frame.
    #[error("invalid frame dimensions: {width}×{height}")]
    InvalidFrame {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Audio companion could not be started. Never fatal to video playback.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),

    /// Terminal write failed. Fatal to the tick, not to the process.
    #[error("display write failed: {0}")]
    DisplayWrite(#[from] std::io::Error),

    /// Key polling failed. Treated as "no key pressed".
    #[error("input unavailable: {0}")]
    InputUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_to_display_write() {
        let err = PlayerError::from(std::io::Error::other("tty gone"));
        assert!(matches!(err, PlayerError::DisplayWrite(_)));
        assert_eq!(err.to_string(), "display write failed: tty gone");
    }

    #[test]
    fn input_failures_carry_their_cause() {
        let err = PlayerError::InputUnavailable("poll failed".to_string());
        assert_eq!(err.to_string(), "input unavailable: poll failed");
    }
}
