// Architecture:
//   - `probe_video`  : queries ffprobe for width/height/fps/frame count
//   - `spawn_pipe`   : launches ffmpeg → raw RGB24 stream on stdout
//   - `VideoSource`  : pull-based FrameSource reading one frame per call

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};

use ap_core::error::PlayerError;
use ap_core::frame::FrameBuffer;
use ap_core::traits::FrameSource;

/// Bandwidth cap for the decode pipe. A 1920×1080 RGB24 stream at 30 fps is
/// ~180 MB/s; capping near 640×360 keeps the pipe around 20 MB/s while still
/// oversampling any realistic glyph grid.
const MAX_PIPE_WIDTH: u32 = 640;
const MAX_PIPE_HEIGHT: u32 = 360;

/// Metadata extracted via ffprobe.
#[derive(Clone, Copy, Debug)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Frames per second as reported by the container (e.g. 23.976, 30.0).
    pub fps: f64,
    /// Total frame count, 0 when the container does not know.
    pub total_frames: u64,
}

/// Parse `ffprobe -show_entries` key=value output.
///
/// `nb_frames` is `N/A` for some containers; that maps to 0 (unknown).
///
/// # Errors
/// Returns an error when no decodable video stream is described.
pub fn parse_probe(text: &str) -> Result<VideoInfo> {
    let mut width: u32 = 0;
    let mut height: u32 = 0;
    let mut fps: f64 = 0.0;
    let mut total_frames: u64 = 0;

    for line in text.lines() {
        if let Some(val) = line.strip_prefix("width=") {
            width = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("height=") {
            height = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("r_frame_rate=") {
            // Format: "24/1" or "30000/1001".
            let mut parts = val.trim().splitn(2, '/');
            let num: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0.0);
            let den: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
            if den > 0.0 {
                fps = num / den;
            }
        } else if let Some(val) = line.strip_prefix("nb_frames=") {
            total_frames = val.trim().parse().unwrap_or(0);
        }
    }

    if width == 0 || height == 0 {
        anyhow::bail!("no video stream found");
    }

    Ok(VideoInfo {
        width,
        height,
        fps,
        total_frames,
    })
}

/// Query ffprobe for the main video stream's metadata.
///
/// # Errors
/// Returns an error if ffprobe cannot be launched or the file contains no
/// decodable video stream.
pub fn probe_video(path: &Path) -> Result<VideoInfo> {
    let path_str = path.to_str().context("video path is not UTF-8")?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate,nb_frames",
            "-of",
            "default=noprint_wrappers=1",
            "-i",
            path_str,
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .context("could not launch ffprobe; is it installed and in PATH?")?;

    let info = parse_probe(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("ffprobe found no video stream in {}", path.display()))?;

    log::info!(
        "probe: {}x{} @ {:.3}fps, {} frames: {}",
        info.width,
        info.height,
        info.fps,
        info.total_frames,
        path.display()
    );
    Ok(info)
}

/// Decode-pipe dimensions: native size capped to the bandwidth limit while
/// preserving the source aspect ratio (the glyph scaler letterboxes later).
#[must_use]
pub fn pipe_dims(native_w: u32, native_h: u32) -> (u32, u32) {
    if native_w <= MAX_PIPE_WIDTH && native_h <= MAX_PIPE_HEIGHT {
        return (native_w.max(1), native_h.max(1));
    }
    let ratio_w = f64::from(MAX_PIPE_WIDTH) / f64::from(native_w);
    let ratio_h = f64::from(MAX_PIPE_HEIGHT) / f64::from(native_h);
    let ratio = ratio_w.min(ratio_h);
    let w = (f64::from(native_w) * ratio).round().max(1.0) as u32;
    let h = (f64::from(native_h) * ratio).round().max(1.0) as u32;
    (w, h)
}

/// Launch ffmpeg writing raw RGB24 frames to stdout.
///
/// Each frame is `w × h × 3` bytes, row-major, no padding. `-an` drops the
/// audio track; audio runs in its own companion process.
fn spawn_pipe(path: &Path, w: u32, h: u32) -> Result<Child> {
    let path_str = path.to_str().context("video path is not UTF-8")?;
    let scale_filter = format!("scale={w}:{h}:flags=bilinear");

    Command::new("ffmpeg")
        .args([
            "-i",
            path_str,
            "-vf",
            &scale_filter,
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-an",
            "-hide_banner",
            "-loglevel",
            "error",
            "pipe:1",
        ])
        .stdout(Stdio::piped())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("could not launch ffmpeg; is it installed and in PATH?")
}

/// Read exactly `buf.len()` bytes from `reader`.
///
/// # Errors
/// Returns `Ok(true)` on success, `Ok(false)` on EOF before completion,
/// `Err` on a fatal I/O error.
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false),
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

/// Pull-based frame source backed by an ffmpeg subprocess.
///
/// One `next_frame` call reads one decoded frame from the pipe. EOF ends the
/// stream; a pipe error also ends it (no retry). `close` kills the child and
/// is idempotent; `Drop` guarantees it runs on every exit path.
pub struct VideoSource {
    info: VideoInfo,
    pipe_w: u32,
    pipe_h: u32,
    child: Option<Child>,
}

impl VideoSource {
    /// Open a video file for decoding.
    ///
    /// # Errors
    /// `SourceNotFound` if the path does not exist; `SourceUnopenable` if
    /// probing or spawning the decoder fails.
    pub fn open(path: &Path) -> Result<Self, PlayerError> {
        if !path.exists() {
            return Err(PlayerError::SourceNotFound {
                path: path.display().to_string(),
            });
        }

        let info = probe_video(path).map_err(|e| PlayerError::SourceUnopenable {
            path: path.display().to_string(),
            reason: format!("{e:#}"),
        })?;

        let (pipe_w, pipe_h) = pipe_dims(info.width, info.height);
        let child = spawn_pipe(path, pipe_w, pipe_h).map_err(|e| PlayerError::SourceUnopenable {
            path: path.display().to_string(),
            reason: format!("{e:#}"),
        })?;
        log::debug!("ffmpeg pipe spawned at {pipe_w}x{pipe_h}");

        Ok(Self {
            info,
            pipe_w,
            pipe_h,
            child: Some(child),
        })
    }

    /// Probed stream metadata.
    #[must_use]
    pub fn info(&self) -> VideoInfo {
        self.info
    }
}

impl FrameSource for VideoSource {
    fn nominal_fps(&self) -> f64 {
        self.info.fps
    }

    fn total_frames(&self) -> u64 {
        self.info.total_frames
    }

    fn next_frame(&mut self) -> Result<Option<FrameBuffer>> {
        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };
        let stdout = child.stdout.as_mut().context("decoder stdout missing")?;

        let mut frame = FrameBuffer::new(self.pipe_w, self.pipe_h);
        match read_exact_or_eof(stdout, &mut frame.data) {
            Ok(true) => Ok(Some(frame)),
            Ok(false) => {
                log::info!("decoder EOF after frame read");
                self.close();
                Ok(None)
            }
            Err(e) => {
                self.close();
                Err(e.context("decoder pipe read failed"))
            }
        }
    }

    fn close(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            log::debug!("ffmpeg pipe closed");
        }
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_probe_full_output() {
        let text = "width=1920\nheight=1080\nr_frame_rate=30000/1001\nnb_frames=6572\n";
        let info = parse_probe(text).unwrap();
        assert_eq!((info.width, info.height), (1920, 1080));
        assert!((info.fps - 29.97).abs() < 0.01);
        assert_eq!(info.total_frames, 6572);
    }

    #[test]
    fn parse_probe_unknown_frame_count() {
        let text = "width=640\nheight=480\nr_frame_rate=24/1\nnb_frames=N/A\n";
        let info = parse_probe(text).unwrap();
        assert_eq!(info.total_frames, 0);
        assert_eq!(info.fps, 24.0);
    }

    #[test]
    fn parse_probe_missing_stream_is_error() {
        assert!(parse_probe("").is_err());
        assert!(parse_probe("r_frame_rate=30/1\n").is_err());
    }

    #[test]
    fn pipe_dims_cap_preserves_aspect() {
        assert_eq!(pipe_dims(320, 240), (320, 240));
        let (w, h) = pipe_dims(1920, 1080);
        assert!(w <= 640 && h <= 360);
        assert!((f64::from(w) / f64::from(h) - 16.0 / 9.0).abs() < 0.02);
        // Tall video caps on height.
        let (w, h) = pipe_dims(1080, 1920);
        assert_eq!(h, 360);
        assert!(w < 640);
    }

    #[test]
    fn read_exact_handles_short_and_full_reads() {
        let mut buf = [0u8; 4];
        let mut full = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        assert!(read_exact_or_eof(&mut full, &mut buf).unwrap());
        assert_eq!(buf, [1, 2, 3, 4]);

        let mut short = Cursor::new(vec![9u8, 9]);
        assert!(!read_exact_or_eof(&mut short, &mut buf).unwrap());
    }
}
