use std::path::Path;
use std::process::{Child, Command, Stdio};

use ap_core::error::PlayerError;
use ap_core::traits::AudioSink;

/// Handle to the child audio process for one playback session.
///
/// At most one process is active per companion. `stop` is idempotent and
/// also runs on `Drop`, so the process cannot outlive playback. There is no
/// resynchronization: start-time alignment only.
///
/// # Example
/// ```
/// use ap_audio::AudioCompanion;
/// use ap_core::traits::AudioSink;
/// let mut companion = AudioCompanion::silent();
/// assert!(!companion.is_running());
/// companion.stop();
/// companion.stop();
/// ```
#[derive(Debug)]
pub struct AudioCompanion {
    child: Option<Child>,
}

impl AudioCompanion {
    /// Companion with no process, for sessions without an audio track.
    #[must_use]
    pub fn silent() -> Self {
        Self { child: None }
    }

    /// Start a silent, auto-exiting playback process for `path`.
    ///
    /// Tries ffplay first, then a platform-specific fallback.
    ///
    /// # Errors
    /// `AudioUnavailable` when the file is missing or every playback method
    /// fails. Callers log this and continue without sound.
    pub fn start(path: &Path) -> Result<Self, PlayerError> {
        if !path.exists() {
            return Err(PlayerError::AudioUnavailable(format!(
                "{} does not exist",
                path.display()
            )));
        }

        match spawn_ffplay(path) {
            Ok(child) => {
                log::info!("audio: ffplay started for {}", path.display());
                Ok(Self { child: Some(child) })
            }
            Err(primary) => {
                log::debug!("audio: ffplay unavailable ({primary}), trying fallback");
                match spawn_fallback(path) {
                    Ok(child) => {
                        log::info!("audio: fallback player started for {}", path.display());
                        Ok(Self { child: Some(child) })
                    }
                    Err(fallback) => Err(PlayerError::AudioUnavailable(format!(
                        "ffplay: {primary}; fallback: {fallback}"
                    ))),
                }
            }
        }
    }
}

impl AudioSink for AudioCompanion {
    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            log::debug!("audio: companion process terminated");
        }
    }

    fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            // try_wait: Ok(None) means still alive.
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Drop for AudioCompanion {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_ffplay(path: &Path) -> std::io::Result<Child> {
    Command::new("ffplay")
        .args(["-nodisp", "-autoexit", "-loglevel", "quiet"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

#[cfg(target_os = "windows")]
fn spawn_fallback(path: &Path) -> std::io::Result<Child> {
    Command::new("powershell")
        .arg("-c")
        .arg(format!(
            "$player = New-Object Media.SoundPlayer '{}'; $player.PlaySync()",
            path.display()
        ))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

#[cfg(target_os = "macos")]
fn spawn_fallback(path: &Path) -> std::io::Result<Child> {
    Command::new("afplay")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn spawn_fallback(path: &Path) -> std::io::Result<Child> {
    Command::new("paplay")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_audio_unavailable() {
        let err = AudioCompanion::start(Path::new("/no/such/track.mp3")).unwrap_err();
        assert!(matches!(err, PlayerError::AudioUnavailable(_)));
    }

    #[test]
    fn stop_is_idempotent_without_process() {
        let mut companion = AudioCompanion::silent();
        companion.stop();
        companion.stop();
        assert!(!companion.is_running());
    }
}
